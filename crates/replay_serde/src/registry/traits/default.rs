use alloc::boxed::Box;

use crate::Reflect;
use crate::info::TypePath;
use crate::registry::FromType;

/// Constructs an empty instance of a registered type.
///
/// Containers are decoded by creating an empty instance of the concrete type
/// named in the payload and filling it, so every container type carries this.
///
/// # Examples
///
/// ```
/// use replay_serde::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_path("linked-list").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let list = generator.default();
/// assert_eq!(list.reflect_type_path(), "linked-list");
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    /// Calls the type's [`Default`].
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + TypePath + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}
