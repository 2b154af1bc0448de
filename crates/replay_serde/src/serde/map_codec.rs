//! Self-describing maps.
//!
//! A map is an array of single-field objects: a `mapType` header, then one
//! `keyType`, `valueType`, entry triple per entry whose key and value are
//! both non-null. The entry's field name is the JSON text of the encoded key.
//!
//! ```json
//! [{"mapType": "linked-hash-map"}, {"keyType": "string"}, {"valueType": "integer"}, {"\"a\"": 1}]
//! ```
//!
//! An entry record is written with one field, but every field it holds is
//! read, each with the `keyType` and `valueType` before it. The bare empty
//! array decodes to an empty [`HashedMap`](crate::impls::HashedMap).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map as Object, Value};

use super::{DecodeDriver, EncodeDriver, base_codec, list_codec};
use crate::info::ReflectKind;
use crate::ops::Map;
use crate::registry::TypeMeta;
use crate::{DecodingError, EncodingError, Reflect, TypeResolutionError};

const MAP_TYPE: &str = "mapType";
const KEY_TYPE: &str = "keyType";
const VALUE_TYPE: &str = "valueType";

fn record(field: &str, value: Value) -> Value {
    let mut object = Object::with_capacity(1);
    object.insert(field.into(), value);
    Value::Object(object)
}

/// Reads the identifier of a `{"mapType": ...}` header.
pub(super) fn header_type_path(header: &Value) -> Option<&str> {
    header.as_object()?.get(MAP_TYPE)?.as_str()
}

pub(super) fn encode(driver: &EncodeDriver<'_>, map: &dyn Map) -> Result<Value, EncodingError> {
    let mut records = Vec::with_capacity(1 + 3 * map.len());
    records.push(record(MAP_TYPE, Value::from(map.reflect_type_path())));

    for (key, value) in map.iter() {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        let encoded_key = driver.encode(key)?;
        let encoded_value = driver.encode(value)?;

        records.push(record(KEY_TYPE, Value::from(key.reflect_type_path())));
        records.push(record(VALUE_TYPE, Value::from(value.reflect_type_path())));
        records.push(record(&base_codec::key_text(key, &encoded_key)?, encoded_value));
    }

    log::trace!(
        "encoded `{}` with {} of {} entries",
        map.reflect_type_path(),
        (records.len() - 1) / 3,
        map.len(),
    );
    Ok(Value::Array(records))
}

/// Reads the identifier stored in a single-field record.
fn read_type_path(record: &Value, field: &'static str, position: usize) -> Result<String, DecodingError> {
    match record.as_object().and_then(|object| object.get(field)) {
        Some(Value::String(type_path)) => Ok(type_path.clone()),
        Some(_) => Err(DecodingError::malformed(
            "map",
            position,
            format_args!("`{field}` is not a string"),
        )),
        None => Err(DecodingError::malformed("map", position, format_args!("missing `{field}`"))),
    }
}

pub(super) fn decode(
    driver: &DecodeDriver<'_>,
    meta: &TypeMeta,
    payload: Value,
) -> Result<Box<dyn Reflect>, DecodingError> {
    let Value::Array(records) = payload else {
        return Err(DecodingError::malformed("map", 0, "payload is not an array"));
    };

    let mut container = list_codec::instantiate(meta)?;
    let Some(map) = container.reflect_mut().into_map() else {
        return Err(TypeResolutionError::KindMismatch {
            type_path: meta.type_path(),
            expected: ReflectKind::Map,
            found: meta.kind(),
        }
        .into());
    };

    if records.len() > 1 && (records.len() - 1) % 3 != 0 {
        return Err(DecodingError::malformed(
            "map",
            records.len() - 1,
            "entries must come as `keyType`, `valueType`, entry triples",
        ));
    }

    let mut records = records.into_iter().skip(1);
    let mut position = 1;
    while let (Some(key_record), Some(value_record), Some(entry)) =
        (records.next(), records.next(), records.next())
    {
        let key_type = read_type_path(&key_record, KEY_TYPE, position)?;
        let value_type = read_type_path(&value_record, VALUE_TYPE, position + 1)?;

        let Value::Object(entry) = entry else {
            return Err(DecodingError::malformed("map", position + 2, "entry is not an object"));
        };
        if entry.is_empty() {
            return Err(DecodingError::malformed("map", position + 2, "entry has no field"));
        }

        // Every field shares the key and value types of the triple.
        for (key_text, value) in entry {
            let key = base_codec::parse_key_text(&key_text, position + 2)?;
            let key = driver.decode_tagged(&key_type, key)?;
            let value = driver.decode_tagged(&value_type, value)?;
            map.insert(Some(key), Some(value));
        }

        position += 3;
    }

    Ok(container)
}
