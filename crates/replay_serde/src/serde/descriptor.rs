use core::fmt;

use crate::info::TypePath;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The type a payload is decoded as.
///
/// The abstract categories accept any registered list or map: the payload
/// names its concrete container, which is what gets built.
///
/// # Examples
///
/// ```
/// use replay_serde::{TypeDescriptor, impls::OrderedMap};
///
/// assert_eq!(TypeDescriptor::of::<OrderedMap>(), TypeDescriptor::Path("linked-hash-map"));
/// assert_eq!(TypeDescriptor::from("integer").to_string(), "integer");
/// assert_eq!(TypeDescriptor::AnyList.to_string(), "<any list>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDescriptor<'a> {
    /// Any registered list type.
    AnyList,
    /// Any registered map type.
    AnyMap,
    /// The type registered under this identifier.
    Path(&'a str),
}

impl TypeDescriptor<'static> {
    /// Describes a concrete type.
    #[inline]
    pub fn of<T: TypePath>() -> Self {
        Self::Path(T::type_path())
    }
}

impl<'a> From<&'a str> for TypeDescriptor<'a> {
    #[inline]
    fn from(type_path: &'a str) -> Self {
        Self::Path(type_path)
    }
}

impl fmt::Display for TypeDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyList => f.write_str("<any list>"),
            Self::AnyMap => f.write_str("<any map>"),
            Self::Path(type_path) => f.write_str(type_path),
        }
    }
}
