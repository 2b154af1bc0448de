use alloc::boxed::Box;

use ::serde::Deserializer;
use ::serde::de::DeserializeOwned;

use crate::Reflect;
use crate::info::TypePath;
use crate::registry::FromType;

/// `serde` deserialization of a registered leaf type.
///
/// Internally stores a function pointer that runs the concrete type's
/// `Deserialize` over a type-erased deserializer and boxes the result.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use replay_serde::registry::{TypeRegistry, TypeTraitDeserialize};
///
/// let registry = TypeRegistry::new();
///
/// let processor = registry
///     .get_type_trait::<TypeTraitDeserialize>(TypeId::of::<i64>())
///     .unwrap();
///
/// let value = processor.deserialize(serde_json::json!(42)).unwrap();
/// assert_eq!(value.take::<i64>().unwrap(), 42);
/// ```
#[derive(Clone)]
pub struct TypeTraitDeserialize {
    func: fn(
        deserializer: &mut dyn erased_serde::Deserializer,
    ) -> Result<Box<dyn Reflect>, erased_serde::Error>,
}

impl TypeTraitDeserialize {
    /// Deserializes a reflected value.
    #[inline(always)]
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        (self.func)(&mut erased).map_err(<D::Error as ::serde::de::Error>::custom)
    }
}

impl<T: DeserializeOwned + TypePath + Reflect> FromType<T> for TypeTraitDeserialize {
    fn from_type() -> Self {
        Self {
            func: |deserializer| Ok(Box::new(erased_serde::deserialize::<T>(deserializer)?)),
        }
    }
}
