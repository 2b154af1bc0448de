use alloc::string::String;
use alloc::vec::{self, Vec};

use ::serde::de::value::{StrDeserializer, StringDeserializer};
use ::serde::de::{self, DeserializeSeed, Deserializer, Unexpected, Visitor};
use serde_json::{Error, Map, Value};

use super::base_codec::parse_non_finite;
use crate::CodecOptions;

// -----------------------------------------------------------------------------
// LenientDeserializer

/// A deserializer over a JSON tree that applies [`CodecOptions`] at every level.
///
/// Leaf types are decoded through their own `Deserialize` impl with this as
/// the deserializer, so a nested `Vec` or `Option` field gets the same
/// leniency as the top-level value.
pub(crate) struct LenientDeserializer {
    value: Value,
    options: CodecOptions,
}

impl LenientDeserializer {
    #[inline]
    pub(crate) const fn new(value: Value, options: CodecOptions) -> Self {
        Self { value, options }
    }

    #[inline]
    fn is_absent_text(&self) -> bool {
        self.options.empty_string_as_absent && matches!(&self.value, Value::String(s) if s.is_empty())
    }

    fn visit_elements<'de, V: Visitor<'de>>(
        elements: Vec<Value>,
        options: CodecOptions,
        visitor: V,
    ) -> Result<V::Value, Error> {
        let len = elements.len();
        let mut seq = LenientSeq {
            iter: elements.into_iter(),
            options,
        };
        let output = visitor.visit_seq(&mut seq)?;
        match seq.iter.len() {
            0 => Ok(output),
            rest => Err(de::Error::invalid_length(len - rest, &"fewer elements in sequence")),
        }
    }

    #[inline]
    fn visit_fields<'de, V: Visitor<'de>>(
        fields: Map<String, Value>,
        options: CodecOptions,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_map(LenientMap {
            iter: fields.into_iter(),
            pending: None,
            options,
        })
    }
}

impl<'de> Deserializer<'de> for LenientDeserializer {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.value {
            Value::Array(elements) => Self::visit_elements(elements, self.options, visitor),
            Value::Object(fields) => Self::visit_fields(fields, self.options, visitor),
            scalar => scalar.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        if self.value.is_null() || self.is_absent_text() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        if self.is_absent_text() {
            return Self::visit_elements(Vec::new(), self.options, visitor);
        }
        match self.value {
            Value::Array(elements) => Self::visit_elements(elements, self.options, visitor),
            Value::Null => visitor.visit_unit(),
            single if self.options.single_value_as_sequence => {
                Self::visit_elements(alloc::vec![single], self.options, visitor)
            }
            other => Self::new(other, self.options).deserialize_any(visitor),
        }
    }

    #[inline]
    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    #[inline]
    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        if self.is_absent_text() {
            return Self::visit_fields(Map::new(), self.options, visitor);
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        if self.is_absent_text() {
            return Self::visit_fields(Map::new(), self.options, visitor);
        }
        match self.value {
            Value::Object(mut object) => {
                if self.options.fail_on_unknown_fields {
                    if let Some(unknown) = object.keys().find(|key| !fields.contains(&key.as_str())) {
                        return Err(de::Error::unknown_field(unknown, fields));
                    }
                } else {
                    object.retain(|key, _| fields.contains(&key.as_str()));
                }
                Self::visit_fields(object, self.options, visitor)
            }
            other => Self::new(other, self.options).deserialize_any(visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.value {
            Value::String(variant) => visitor.visit_enum(StringDeserializer::<Error>::new(variant)),
            Value::Number(number) if !self.options.enums_by_name => {
                match number.as_u64().and_then(|i| variants.get(i as usize)) {
                    Some(variant) => visitor.visit_enum(StrDeserializer::<Error>::new(variant)),
                    None => Err(de::Error::invalid_value(
                        Unexpected::Other("out of range variant ordinal"),
                        &visitor,
                    )),
                }
            }
            Value::Object(object) if object.len() == 1 => {
                let mut entries = object.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(LenientEnum {
                        variant,
                        value,
                        options: self.options,
                    }),
                    None => Err(de::Error::invalid_length(0, &"a single-entry object")),
                }
            }
            other => other.deserialize_enum(name, variants, visitor),
        }
    }

    #[inline]
    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.value.as_str().and_then(parse_non_finite) {
            Some(float) => visitor.visit_f64(float),
            None => self.deserialize_any(visitor),
        }
    }

    #[inline]
    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_unit()
    }

    ::serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 char str string
        bytes byte_buf unit unit_struct identifier
    }
}

// -----------------------------------------------------------------------------
// Access types

struct LenientSeq {
    iter: vec::IntoIter<Value>,
    options: CodecOptions,
}

impl<'de> de::SeqAccess<'de> for LenientSeq {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(LenientDeserializer::new(value, self.options))
                .map(Some),
            None => Ok(None),
        }
    }

    #[inline]
    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct LenientMap {
    iter: serde_json::map::IntoIter,
    pending: Option<Value>,
    options: CodecOptions,
}

impl<'de> de::MapAccess<'de> for LenientMap {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(MapKeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        match self.pending.take() {
            Some(value) => seed.deserialize(LenientDeserializer::new(value, self.options)),
            None => Err(de::Error::custom("value is missing")),
        }
    }

    #[inline]
    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct LenientEnum {
    variant: String,
    value: Value,
    options: CodecOptions,
}

impl<'de> de::EnumAccess<'de> for LenientEnum {
    type Error = Error;
    type Variant = LenientVariant;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, LenientVariant), Error> {
        let variant = seed.deserialize(StringDeserializer::<Error>::new(self.variant))?;
        Ok((
            variant,
            LenientVariant {
                value: self.value,
                options: self.options,
            },
        ))
    }
}

struct LenientVariant {
    value: Value,
    options: CodecOptions,
}

impl<'de> de::VariantAccess<'de> for LenientVariant {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, Error> {
        seed.deserialize(LenientDeserializer::new(self.value, self.options))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        LenientDeserializer::new(self.value, self.options).deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        LenientDeserializer::new(self.value, self.options).deserialize_struct("", fields, visitor)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

// -----------------------------------------------------------------------------
// MapKeyDeserializer

/// Object keys are always text; numeric and boolean key types parse it back.
struct MapKeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            match self.key.parse::<$ty>() {
                Ok(parsed) => visitor.$visit(parsed),
                Err(_) => Err(de::Error::invalid_type(Unexpected::Str(&self.key), &visitor)),
            }
        }
    )*};
}

impl<'de> Deserializer<'de> for MapKeyDeserializer {
    type Error = Error;

    #[inline]
    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    #[inline]
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_some(self)
    }

    #[inline]
    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    #[inline]
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_enum(StringDeserializer::<Error>::new(self.key))
    }

    ::serde::forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use ::serde::Deserialize;
    use ::serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    use super::LenientDeserializer;
    use crate::CodecOptions;

    fn lenient<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
        T::deserialize(LenientDeserializer::new(value, CodecOptions::LENIENT))
    }

    fn strict<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
        T::deserialize(LenientDeserializer::new(value, CodecOptions::STRICT))
    }

    #[derive(Deserialize, Debug, PartialEq, Default)]
    #[serde(default)]
    struct Order {
        id: u32,
        tags: Vec<String>,
        note: Option<String>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Status {
        Open,
        Closed,
        Held(u32),
    }

    #[test]
    fn single_value_as_sequence() {
        let order: Order = lenient(json!({ "id": 1, "tags": "urgent" })).unwrap();
        assert_eq!(order.tags, ["urgent"]);

        let tags: Vec<u8> = lenient(json!(7)).unwrap();
        assert_eq!(tags, [7]);

        assert!(strict::<Vec<u8>>(json!(7)).is_err());
    }

    #[test]
    fn empty_string_as_absent() {
        let order: Order = lenient(json!({ "id": 2, "note": "" })).unwrap();
        assert_eq!(order.note, None);

        let order: Order = lenient(json!("")).unwrap();
        assert_eq!(order, Order::default());

        let tags: Vec<String> = lenient(json!("")).unwrap();
        assert!(tags.is_empty());

        let order: Order = strict(json!({ "id": 2, "note": "" })).unwrap();
        assert_eq!(order.note.as_deref(), Some(""));
        assert!(strict::<Order>(json!("")).is_err());
    }

    #[test]
    fn unknown_fields() {
        let order: Order = lenient(json!({ "id": 3, "extra": true })).unwrap();
        assert_eq!(order.id, 3);

        let err = strict::<Order>(json!({ "id": 3, "extra": true })).unwrap_err();
        assert!(err.to_string().contains("unknown field `extra`"));
    }

    #[test]
    fn enums() {
        assert_eq!(lenient::<Status>(json!("Closed")).unwrap(), Status::Closed);
        assert_eq!(lenient::<Status>(json!({ "Held": 4 })).unwrap(), Status::Held(4));
        assert!(lenient::<Status>(json!(1)).is_err());

        let by_ordinal = CodecOptions {
            enums_by_name: false,
            ..CodecOptions::LENIENT
        };
        let status = Status::deserialize(LenientDeserializer::new(json!(1), by_ordinal)).unwrap();
        assert_eq!(status, Status::Closed);
        assert!(Status::deserialize(LenientDeserializer::new(json!(9), by_ordinal)).is_err());
        assert_eq!(
            Status::deserialize(LenientDeserializer::new(json!("Open"), by_ordinal)).unwrap(),
            Status::Open,
        );
    }

    #[test]
    fn numeric_map_keys() {
        let map: BTreeMap<u16, bool> = lenient(json!({ "1": true, "20": false })).unwrap();
        assert_eq!(map.get(&20), Some(&false));

        assert!(lenient::<BTreeMap<u16, bool>>(json!({ "x": true })).is_err());
    }

    #[test]
    fn non_finite_float_text() {
        let values: Vec<f64> = lenient(json!(["Infinity", 2.5])).unwrap();
        assert_eq!(values, [f64::INFINITY, 2.5]);
        assert!(lenient::<f32>(json!("NaN")).unwrap().is_nan());
        assert!(lenient::<f64>(json!("infinite")).is_err());
    }
}
