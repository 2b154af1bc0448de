//! Self-describing lists.
//!
//! A list is a flat array: the identifier of the list type, then one
//! `identifier, payload` pair per non-null element.
//!
//! ```json
//! ["array-backed-list", "string", "a", "integer", 3]
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use serde_json::Value;

use super::{DecodeDriver, EncodeDriver};
use crate::info::ReflectKind;
use crate::ops::List;
use crate::registry::{TypeMeta, TypeTraitDefault};
use crate::{DecodingError, EncodingError, Reflect, TypeResolutionError};

pub(super) fn encode(driver: &EncodeDriver<'_>, list: &dyn List) -> Result<Value, EncodingError> {
    let mut records = Vec::with_capacity(1 + 2 * list.len());
    records.push(Value::from(list.reflect_type_path()));

    for element in list.iter().flatten() {
        let payload = driver.encode(element)?;
        records.push(Value::from(element.reflect_type_path()));
        records.push(payload);
    }

    log::trace!(
        "encoded `{}` with {} of {} slots",
        list.reflect_type_path(),
        (records.len() - 1) / 2,
        list.len(),
    );
    Ok(Value::Array(records))
}

pub(super) fn decode(
    driver: &DecodeDriver<'_>,
    meta: &TypeMeta,
    payload: Value,
) -> Result<Box<dyn Reflect>, DecodingError> {
    let Value::Array(records) = payload else {
        return Err(DecodingError::malformed("list", 0, "payload is not an array"));
    };

    let mut container = instantiate(meta)?;
    let Some(list) = container.reflect_mut().into_list() else {
        return Err(TypeResolutionError::KindMismatch {
            type_path: meta.type_path(),
            expected: ReflectKind::List,
            found: meta.kind(),
        }
        .into());
    };

    let mut records = records.into_iter().enumerate().skip(1);
    while let Some((position, tag)) = records.next() {
        let Value::String(type_path) = tag else {
            return Err(DecodingError::malformed("list", position, "element type identifier is not a string"));
        };
        let Some((_, element)) = records.next() else {
            return Err(DecodingError::malformed(
                "list",
                position,
                format_args!("element `{type_path}` has no payload"),
            ));
        };
        list.push(Some(driver.decode_tagged(&type_path, element)?));
    }

    Ok(container)
}

/// Creates an empty instance of the container described by `meta`.
pub(super) fn instantiate(meta: &TypeMeta) -> Result<Box<dyn Reflect>, DecodingError> {
    match meta.get_trait::<TypeTraitDefault>() {
        Some(generator) => Ok(generator.default()),
        None => Err(TypeResolutionError::NotConstructible {
            type_path: meta.type_path(),
        }
        .into()),
    }
}
