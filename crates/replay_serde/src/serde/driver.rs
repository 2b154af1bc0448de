//! Dispatch between overrides, containers and leaves.

use alloc::boxed::Box;
use alloc::string::String;

use serde_json::Value;

use super::{base_codec, list_codec, map_codec};
use crate::impls::HashedMap;
use crate::info::{ReflectKind, TypePath};
use crate::ops::ReflectRef;
use crate::registry::{TypeMeta, TypeRegistry, TypeTraitDecodeOverride, TypeTraitEncodeOverride};
use crate::{CodecOptions, DecodingError, EncodingError, Reflect, TypeResolutionError};

// -----------------------------------------------------------------------------
// EncodeDriver

/// Turns reflected values into JSON trees.
#[derive(Clone, Copy)]
pub(crate) struct EncodeDriver<'a> {
    registry: &'a TypeRegistry,
    options: &'a CodecOptions,
}

impl<'a> EncodeDriver<'a> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry, options: &'a CodecOptions) -> Self {
        Self { registry, options }
    }

    /// Encodes a value.
    ///
    /// A registered encode override wins over the structural encoding.
    pub fn encode(&self, value: &dyn Reflect) -> Result<Value, EncodingError> {
        if let Some(custom) = self
            .registry
            .get_type_trait::<TypeTraitEncodeOverride>(value.ty_id())
        {
            return custom.encode(value);
        }

        match value.reflect_ref() {
            ReflectRef::List(list) => list_codec::encode(self, list),
            ReflectRef::Map(map) => map_codec::encode(self, map),
            ReflectRef::Leaf(leaf) => base_codec::encode_leaf(self.registry, self.options, leaf),
        }
    }
}

// -----------------------------------------------------------------------------
// DecodeDriver

/// Turns JSON trees back into reflected values.
#[derive(Clone, Copy)]
pub(crate) struct DecodeDriver<'a> {
    registry: &'a TypeRegistry,
    options: &'a CodecOptions,
}

impl<'a> DecodeDriver<'a> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry, options: &'a CodecOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Returns an encoder sharing the registry and options.
    #[inline]
    pub const fn encoder(&self) -> EncodeDriver<'a> {
        EncodeDriver::new(self.registry, self.options)
    }

    /// Resolves a type identifier, optionally requiring a container category.
    pub fn resolve(
        &self,
        type_path: &str,
        expected: Option<ReflectKind>,
    ) -> Result<&'a TypeMeta, TypeResolutionError> {
        let Some(meta) = self.registry.get_with_type_path(type_path) else {
            return Err(TypeResolutionError::Unknown {
                type_path: String::from(type_path),
            });
        };
        match expected {
            Some(expected) if expected != meta.kind() => Err(TypeResolutionError::KindMismatch {
                type_path: meta.type_path(),
                expected,
                found: meta.kind(),
            }),
            _ => Ok(meta),
        }
    }

    /// Decodes the payload written next to a type identifier.
    pub fn decode_tagged(&self, type_path: &str, payload: Value) -> Result<Box<dyn Reflect>, DecodingError> {
        let meta = self.resolve(type_path, None)?;
        self.decode_with_meta(meta, payload)
    }

    /// Decodes a payload as the given type.
    ///
    /// A registered decode override receives the payload untouched. Otherwise
    /// a container payload carries its own identifier, which is resolved
    /// again and may name a different container of the same category.
    pub fn decode_with_meta(&self, meta: &TypeMeta, payload: Value) -> Result<Box<dyn Reflect>, DecodingError> {
        if let Some(custom) = meta.get_trait::<TypeTraitDecodeOverride>() {
            return custom.decode(payload);
        }

        match meta.kind() {
            ReflectKind::Leaf => base_codec::decode_leaf(meta, self.options, payload),
            ReflectKind::List => self.decode_list(payload),
            ReflectKind::Map => self.decode_map(payload),
        }
    }

    /// Decodes a self-describing list payload.
    pub fn decode_list(&self, payload: Value) -> Result<Box<dyn Reflect>, DecodingError> {
        let meta = match &payload {
            Value::Array(records) => match records.first() {
                Some(Value::String(type_path)) => self.resolve(type_path, Some(ReflectKind::List))?,
                Some(_) => return Err(DecodingError::malformed("list", 0, "type identifier is not a string")),
                None => return Err(DecodingError::malformed("list", 0, "missing type identifier")),
            },
            _ => return Err(DecodingError::malformed("list", 0, "payload is not an array")),
        };
        self.decode_container(meta, payload, list_codec::decode)
    }

    /// Decodes a self-describing map payload.
    ///
    /// The bare empty array stands for an empty [`HashedMap`].
    pub fn decode_map(&self, payload: Value) -> Result<Box<dyn Reflect>, DecodingError> {
        let meta = match &payload {
            Value::Array(records) => match records.first() {
                None => self.resolve(HashedMap::type_path(), Some(ReflectKind::Map))?,
                Some(header) => match map_codec::header_type_path(header) {
                    Some(type_path) => self.resolve(type_path, Some(ReflectKind::Map))?,
                    None => return Err(DecodingError::malformed("map", 0, "missing `mapType` header")),
                },
            },
            _ => return Err(DecodingError::malformed("map", 0, "payload is not an array")),
        };
        self.decode_container(meta, payload, map_codec::decode)
    }

    fn decode_container(
        &self,
        meta: &TypeMeta,
        payload: Value,
        structural: fn(&Self, &TypeMeta, Value) -> Result<Box<dyn Reflect>, DecodingError>,
    ) -> Result<Box<dyn Reflect>, DecodingError> {
        match meta.get_trait::<TypeTraitDecodeOverride>() {
            Some(custom) => custom.decode(payload),
            None => structural(self, meta, payload),
        }
    }
}
