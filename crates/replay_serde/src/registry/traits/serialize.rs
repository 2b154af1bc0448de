use ::serde::{Serialize, Serializer};

use crate::Reflect;
use crate::info::TypePath;
use crate::registry::FromType;

/// `serde` serialization of a registered leaf type.
///
/// Internally stores a function pointer that downcasts a reflected value to
/// the concrete type and exposes it as an `erased_serde::Serialize`.
///
/// # Examples
///
/// ```
/// use replay_serde::Reflect;
/// use replay_serde::registry::{TypeRegistry, TypeTraitSerialize};
///
/// let registry = TypeRegistry::new();
/// let input = String::from("a");
///
/// let processor = registry
///     .get_type_trait::<TypeTraitSerialize>(input.ty_id())
///     .unwrap();
///
/// let value = processor.serialize(&input, serde_json::value::Serializer).unwrap();
/// assert_eq!(value, serde_json::json!("a"));
/// ```
#[derive(Clone)]
pub struct TypeTraitSerialize {
    func: fn(value: &dyn Reflect) -> Option<&dyn erased_serde::Serialize>,
}

impl<T: Serialize + TypePath + Reflect> FromType<T> for TypeTraitSerialize {
    fn from_type() -> Self {
        Self {
            func: |value| {
                value
                    .downcast_ref::<T>()
                    .map(|val| val as &dyn erased_serde::Serialize)
            },
        }
    }
}

impl TypeTraitSerialize {
    /// Calls the type's [`Serialize`].
    ///
    /// A value of another concrete type is rejected with a custom error.
    pub fn serialize<S: Serializer>(
        &self,
        value: &dyn Reflect,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match (self.func)(value) {
            Some(erased) => erased.serialize(serializer),
            None => Err(<S::Error as ::serde::ser::Error>::custom(format_args!(
                "serializer was given a mismatched `{}`",
                value.reflect_type_path(),
            ))),
        }
    }
}
