use crate::info::TypePath;

/// Trait used to generate a [`TypeTrait`] for a concrete type.
///
/// # Example
///
/// ```
/// # use replay_serde::{impls::VecList, info::ReflectKind};
/// # use replay_serde::registry::{FromType, TypeMeta, TypeTraitDefault};
/// let mut meta = TypeMeta::of::<VecList>(ReflectKind::List);
///
/// meta.insert_trait::<TypeTraitDefault>(FromType::<VecList>::from_type());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
pub trait FromType<T: TypePath> {
    fn from_type() -> Self;
}
