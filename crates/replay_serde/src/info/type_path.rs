/// The stable identifier of a concrete type, as written into payloads.
///
/// Unlike [`core::any::type_name`], the identifier is chosen by the
/// implementor and must not change between the recording and the replaying
/// build. Two registered types must never share an identifier.
///
/// # Examples
///
/// ```
/// use replay_serde::{impls::VecList, info::TypePath};
///
/// assert_eq!(VecList::type_path(), "array-backed-list");
/// assert_eq!(<i32 as TypePath>::type_path(), "integer");
/// ```
pub trait TypePath: 'static {
    /// Returns the wire identifier of the type.
    fn type_path() -> &'static str;
}
