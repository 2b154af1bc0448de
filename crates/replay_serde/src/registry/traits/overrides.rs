use alloc::boxed::Box;

use serde_json::Value;

use crate::info::TypePath;
use crate::{DecodingError, EncodingError, Reflect};

type EncodeFn = dyn Fn(&dyn Reflect) -> Result<Value, EncodingError> + Send + Sync;
type DecodeFn = dyn Fn(Value) -> Result<Box<dyn Reflect>, DecodingError> + Send + Sync;

// -----------------------------------------------------------------------------
// TypeTraitEncodeOverride

/// A user-supplied encoder that replaces the default one for a type.
///
/// Installed through [`TypeRegistry::register_serializer`]. The codec
/// consults it before any structural encoding, so it applies to leaves and
/// containers alike.
///
/// [`TypeRegistry::register_serializer`]: crate::registry::TypeRegistry::register_serializer
pub struct TypeTraitEncodeOverride {
    func: Box<EncodeFn>,
}

impl TypeTraitEncodeOverride {
    /// Wraps a typed encode function.
    pub fn new<T, F>(func: F) -> Self
    where
        T: TypePath + Reflect,
        F: Fn(&T) -> Result<Value, EncodingError> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(move |value: &dyn Reflect| match value.downcast_ref::<T>() {
                Some(value) => func(value),
                None => Err(EncodingError::TypeMismatch {
                    expected: T::type_path(),
                    found: value.reflect_type_path(),
                }),
            }),
        }
    }

    /// Encodes `value` into a JSON tree.
    #[inline]
    pub fn encode(&self, value: &dyn Reflect) -> Result<Value, EncodingError> {
        (self.func)(value)
    }
}

// -----------------------------------------------------------------------------
// TypeTraitDecodeOverride

/// A user-supplied decoder that replaces the default one for a type.
///
/// Installed through [`TypeRegistry::register_deserializer`]. It receives the
/// payload found next to the type identifier, untouched by lenient parsing.
///
/// [`TypeRegistry::register_deserializer`]: crate::registry::TypeRegistry::register_deserializer
pub struct TypeTraitDecodeOverride {
    func: Box<DecodeFn>,
}

impl TypeTraitDecodeOverride {
    /// Wraps a typed decode function.
    pub fn new<T, F>(func: F) -> Self
    where
        T: TypePath + Reflect,
        F: Fn(Value) -> Result<T, DecodingError> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(move |payload: Value| -> Result<Box<dyn Reflect>, DecodingError> {
                let value: Box<dyn Reflect> = Box::new(func(payload)?);
                Ok(value)
            }),
        }
    }

    /// Decodes a JSON tree into a value.
    #[inline]
    pub fn decode(&self, payload: Value) -> Result<Box<dyn Reflect>, DecodingError> {
        (self.func)(payload)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use serde_json::{Value, json};

    use super::{TypeTraitDecodeOverride, TypeTraitEncodeOverride};
    use crate::{DecodingError, EncodingError};

    #[test]
    fn encode_checks_type() {
        let encoder =
            TypeTraitEncodeOverride::new::<String, _>(|s: &String| Ok(Value::from(s.to_uppercase())));

        assert_eq!(encoder.encode(&String::from("ab")).unwrap(), json!("AB"));
        assert!(matches!(
            encoder.encode(&1_i32),
            Err(EncodingError::TypeMismatch { expected: "string", found: "integer" }),
        ));
    }

    #[test]
    fn decode_boxes_result() {
        let decoder = TypeTraitDecodeOverride::new::<i32, _>(|payload| match payload {
            Value::String(s) => s.parse().map_err(DecodingError::custom),
            _ => Err(DecodingError::custom("expected text")),
        });

        let value = decoder.decode(json!("12")).unwrap();
        assert_eq!(value.take::<i32>().unwrap(), 12);

        let err = decoder.decode(json!(12)).unwrap_err();
        assert_eq!(err.to_string(), "expected text");
    }
}
