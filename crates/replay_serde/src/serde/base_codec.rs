//! Leaf values: serde through the registry, with lenient decoding.

use alloc::boxed::Box;
use alloc::string::String;

use serde_json::Value;

use super::{DecodeDriver, LenientDeserializer};
use crate::registry::{TypeMeta, TypeRegistry, TypeTraitDeserialize, TypeTraitSerialize};
use crate::{CodecOptions, DecodingError, EncodingError, Reflect, TypeResolutionError};

/// Encodes a leaf through its registered [`TypeTraitSerialize`].
pub(super) fn encode_leaf(
    registry: &TypeRegistry,
    options: &CodecOptions,
    value: &dyn Reflect,
) -> Result<Value, EncodingError> {
    let type_path = value.reflect_type_path();
    let Some(serializer) = registry.get_type_trait::<TypeTraitSerialize>(value.ty_id()) else {
        return Err(EncodingError::Unregistered { type_path });
    };

    if let Some(text) = non_finite_text(value) {
        return Ok(Value::from(text));
    }

    let encoded = serializer
        .serialize(value, serde_json::value::Serializer)
        .map_err(|source| EncodingError::Leaf { type_path, source })?;

    if options.fail_on_empty_structures && matches!(&encoded, Value::Object(fields) if fields.is_empty()) {
        return Err(EncodingError::EmptyStructure { type_path });
    }
    Ok(encoded)
}

/// Decodes a leaf through its registered [`TypeTraitDeserialize`].
pub(super) fn decode_leaf(
    meta: &TypeMeta,
    options: &CodecOptions,
    payload: Value,
) -> Result<Box<dyn Reflect>, DecodingError> {
    let type_path = meta.type_path();
    let Some(deserializer) = meta.get_trait::<TypeTraitDeserialize>() else {
        return Err(TypeResolutionError::NotDeserializable { type_path }.into());
    };

    deserializer
        .deserialize(LenientDeserializer::new(payload, *options))
        .map_err(|source| DecodingError::Leaf { type_path, source })
}

/// Returns the text a non-finite `f32` or `f64` leaf is written as.
///
/// JSON numbers cannot hold these values, `serde_json` would write `null`.
fn non_finite_text(value: &dyn Reflect) -> Option<&'static str> {
    let float = match (value.downcast_ref::<f64>(), value.downcast_ref::<f32>()) {
        (Some(float), _) => *float,
        (_, Some(float)) => f64::from(*float),
        _ => return None,
    };
    if float.is_nan() {
        Some("NaN")
    } else if float == f64::INFINITY {
        Some("Infinity")
    } else if float == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

/// Parses the text written by [`non_finite_text`].
pub(super) fn parse_non_finite(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

/// Returns the field name under which a map entry is written: the JSON text
/// of the encoded key.
pub(super) fn key_text(key: &dyn Reflect, encoded: &Value) -> Result<String, EncodingError> {
    serde_json::to_string(encoded).map_err(|source| EncodingError::Leaf {
        type_path: key.reflect_type_path(),
        source,
    })
}

/// Parses the field name of a map entry back into the encoded key.
pub(super) fn parse_key_text(text: &str, position: usize) -> Result<Value, DecodingError> {
    serde_json::from_str(text).map_err(|err| {
        DecodingError::malformed("map", position, format_args!("key `{text}` is not JSON text: {err}"))
    })
}

/// Updates a leaf in place.
///
/// The current value is encoded and the top-level fields of an object
/// payload overwrite its fields, fields absent from the payload are kept.
/// Any other payload replaces the value as a whole. If the current value
/// cannot be encoded, it is left untouched and the update fails.
pub(super) fn update_leaf(
    driver: &DecodeDriver<'_>,
    target: &mut dyn Reflect,
    payload: Value,
) -> Result<(), DecodingError> {
    let expected = target.reflect_type_path();
    let Some(meta) = driver.registry().get(target.ty_id()) else {
        return Err(TypeResolutionError::Unknown {
            type_path: String::from(expected),
        }
        .into());
    };

    let merged = match payload {
        Value::Object(fields) => match driver.encoder().encode(target) {
            Ok(Value::Object(mut current)) => {
                current.extend(fields);
                Value::Object(current)
            }
            Ok(_) => Value::Object(fields),
            Err(source) => {
                return Err(DecodingError::Merge {
                    type_path: expected,
                    source,
                });
            }
        },
        other => other,
    };

    let value = driver.decode_with_meta(meta, merged)?;
    target.set(value).map_err(|value| DecodingError::TypeMismatch {
        expected,
        found: value.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use ::serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::{decode_leaf, encode_leaf, parse_key_text};
    use crate::registry::TypeRegistry;
    use crate::{CodecOptions, DecodingError, EncodingError, TypeResolutionError};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Marker {}

    crate::impl_reflect_leaf!(Marker => "marker");

    #[derive(Serialize, Debug)]
    struct WriteOnly(u8);

    crate::impl_reflect_leaf!(WriteOnly => "write-only");

    impl<'de> Deserialize<'de> for WriteOnly {
        fn deserialize<D: ::serde::Deserializer<'de>>(_: D) -> Result<Self, D::Error> {
            Err(::serde::de::Error::custom("write only"))
        }
    }

    #[test]
    fn empty_structures() {
        let mut registry = TypeRegistry::new();
        registry.register::<Marker>();

        let lenient = encode_leaf(&registry, &CodecOptions::LENIENT, &Marker {}).unwrap();
        assert_eq!(lenient, json!({}));

        let err = encode_leaf(&registry, &CodecOptions::STRICT, &Marker {}).unwrap_err();
        assert!(matches!(err, EncodingError::EmptyStructure { type_path: "marker" }));
    }

    #[test]
    fn unregistered_leaf() {
        let registry = TypeRegistry::empty();
        let err = encode_leaf(&registry, &CodecOptions::LENIENT, &String::from("a")).unwrap_err();
        assert!(matches!(err, EncodingError::Unregistered { type_path: "string" }));
    }

    #[test]
    fn leaf_errors_keep_source() {
        let mut registry = TypeRegistry::new();
        registry.register::<WriteOnly>();
        let meta = registry.get_with_type_path("write-only").unwrap();

        let err = decode_leaf(meta, &CodecOptions::LENIENT, json!(1)).unwrap_err();
        assert!(matches!(err, DecodingError::Leaf { type_path: "write-only", .. }));
        assert!(core::error::Error::source(&err).is_some());

        let meta = registry.get_with_type_path("integer").unwrap();
        let value = decode_leaf(meta, &CodecOptions::LENIENT, json!(12)).unwrap();
        assert_eq!(value.take::<i32>().unwrap(), 12);
    }

    #[test]
    fn missing_deserializer() {
        let mut registry = TypeRegistry::empty();
        registry.insert_type_meta(crate::registry::TypeMeta::of::<Marker>(crate::info::ReflectKind::Leaf));
        let meta = registry.get_with_type_path("marker").unwrap();

        let err = decode_leaf(meta, &CodecOptions::LENIENT, json!({})).unwrap_err();
        assert!(matches!(
            err,
            DecodingError::TypeResolution(TypeResolutionError::NotDeserializable { type_path: "marker" }),
        ));
    }

    #[test]
    fn non_finite_floats() {
        let registry = TypeRegistry::new();
        let options = CodecOptions::LENIENT;

        assert_eq!(encode_leaf(&registry, &options, &f64::NAN).unwrap(), json!("NaN"));
        assert_eq!(encode_leaf(&registry, &options, &f32::INFINITY).unwrap(), json!("Infinity"));
        assert_eq!(encode_leaf(&registry, &options, &f64::NEG_INFINITY).unwrap(), json!("-Infinity"));
        assert_eq!(encode_leaf(&registry, &options, &1.5_f64).unwrap(), json!(1.5));

        let meta = registry.get_with_type_path("float").unwrap();
        let value = decode_leaf(meta, &options, json!("-Infinity")).unwrap();
        assert_eq!(value.take::<f32>().unwrap(), f32::NEG_INFINITY);

        let meta = registry.get_with_type_path("double").unwrap();
        let value = decode_leaf(meta, &options, json!("NaN")).unwrap();
        assert!(value.take::<f64>().unwrap().is_nan());

        assert!(decode_leaf(meta, &options, json!("nan")).is_err());
    }

    #[test]
    fn key_text_must_be_json() {
        assert_eq!(parse_key_text("\"a\"", 3).unwrap(), json!("a"));
        assert_eq!(parse_key_text("12", 3).unwrap(), json!(12));

        let err = parse_key_text("a", 3).unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", position: 3, .. }));
    }
}
