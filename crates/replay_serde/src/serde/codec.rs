use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use std::io;

use serde_json::Value;

use super::{DecodeDriver, EncodeDriver, TypeDescriptor, base_codec};
use crate::info::TypePath;
use crate::ops::{List, Map, ReflectMut};
use crate::registry::{GetTypeMeta, TypeRegistry, TypeRegistryArc};
use crate::{CodecOptions, DecodingError, EncodingError, Reflect, TypeResolutionError};

// -----------------------------------------------------------------------------
// JsonCodec

/// The entry point of the codec.
///
/// A `JsonCodec` pairs a shared [`TypeRegistryArc`] with the
/// [`CodecOptions`] leaves are read with. Cloning it is cheap and the clones
/// share the registry, so an override registered through one clone is seen by
/// all of them.
///
/// Encoding and decoding only read the registry and may run on any number of
/// threads at once. Registrations wait for in-flight calls to finish.
///
/// # Examples
///
/// ```
/// use replay_serde::{JsonCodec, TypeDescriptor, impls::OrderedMap, ops::Map};
///
/// let codec = JsonCodec::new();
///
/// let mut map = OrderedMap::new();
/// map.insert(String::from("a"), 1_i32);
///
/// let bytes = codec.serialize(&map).unwrap();
/// assert_eq!(
///     bytes,
///     br#"[{"mapType":"linked-hash-map"},{"keyType":"string"},{"valueType":"integer"},{"\"a\"":1}]"#,
/// );
///
/// let back = codec.deserialize_dyn(&bytes, TypeDescriptor::AnyMap).unwrap();
/// assert_eq!(back.reflect_type_path(), "linked-hash-map");
/// assert_eq!(back.reflect_ref().as_map().unwrap().len(), 1);
/// ```
///
/// Overrides replace the default encoding of a type, containers included:
///
/// ```
/// use replay_serde::{DecodingError, JsonCodec};
/// use serde_json::Value;
///
/// let codec = JsonCodec::new();
/// codec.register_serializer::<bool, _>(|b| Ok(Value::from(if *b { "Y" } else { "N" })));
/// codec.register_deserializer::<bool, _>(|payload| match payload.as_str() {
///     Some("Y") => Ok(true),
///     Some("N") => Ok(false),
///     _ => Err(DecodingError::custom("expected `Y` or `N`")),
/// });
///
/// assert_eq!(codec.serialize(&true).unwrap(), br#""Y""#);
/// assert!(!codec.deserialize::<bool>(br#""N""#).unwrap());
/// ```
#[derive(Clone, Default, Debug)]
pub struct JsonCodec {
    registry: TypeRegistryArc,
    options: CodecOptions,
}

impl JsonCodec {
    /// Creates a codec over a fresh [`TypeRegistry::new`] with lenient options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec over an existing registry handle.
    #[inline]
    pub fn with_registry(registry: TypeRegistryArc) -> Self {
        Self {
            registry,
            options: CodecOptions::default(),
        }
    }

    /// Replaces the options leaves are read with.
    #[inline]
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the shared registry handle.
    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Returns the options leaves are read with.
    #[inline]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Registers a type, see [`TypeRegistry::register`].
    #[inline]
    pub fn register<T: GetTypeMeta>(&self) -> bool {
        self.registry.write().register::<T>()
    }

    /// Installs an encode override for `T`, see
    /// [`TypeRegistry::register_serializer`].
    ///
    /// Returns `false` if `T` cannot be registered because its identifier
    /// belongs to another type.
    ///
    /// The override runs while the registry is read, it must not register
    /// types through this codec.
    pub fn register_serializer<T, F>(&self, func: F) -> bool
    where
        T: GetTypeMeta + Reflect,
        F: Fn(&T) -> Result<Value, EncodingError> + Send + Sync + 'static,
    {
        self.registry.write().register_serializer::<T, F>(func)
    }

    /// Installs a decode override for `T`, see
    /// [`TypeRegistry::register_deserializer`].
    ///
    /// Returns `false` if `T` cannot be registered because its identifier
    /// belongs to another type.
    ///
    /// The override runs while the registry is read, it must not register
    /// types through this codec.
    pub fn register_deserializer<T, F>(&self, func: F) -> bool
    where
        T: GetTypeMeta + Reflect,
        F: Fn(Value) -> Result<T, DecodingError> + Send + Sync + 'static,
    {
        self.registry.write().register_deserializer::<T, F>(func)
    }

    // -------------------------------------------------------------------------
    // Encoding

    /// Encodes a value into a JSON tree.
    pub fn encode(&self, value: &dyn Reflect) -> Result<Value, EncodingError> {
        let registry = self.registry.read();
        EncodeDriver::new(&registry, &self.options)
            .encode(value)
            .inspect_err(|err| log::error!("failed to encode `{}`: {err}", value.reflect_type_path()))
    }

    /// Encodes a value into JSON bytes.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<Vec<u8>, EncodingError> {
        let mut bytes = Vec::with_capacity(128);
        self.serialize_to_writer(value, &mut bytes)?;
        Ok(bytes)
    }

    /// Encodes a value and writes the JSON text to `writer`.
    pub fn serialize_to_writer<W: io::Write>(&self, value: &dyn Reflect, writer: W) -> Result<(), EncodingError> {
        let tree = self.encode(value)?;
        serde_json::to_writer(writer, &tree).map_err(|err| {
            log::error!("failed to write `{}`: {err}", value.reflect_type_path());
            EncodingError::Sink(err)
        })
    }

    // -------------------------------------------------------------------------
    // Decoding

    /// Decodes a value of a registered type.
    ///
    /// A list or map payload builds the container it names. If that is not
    /// `T`, decoding fails with [`DecodingError::TypeMismatch`].
    pub fn deserialize<T: Reflect + TypePath>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        self.decode_as::<T>(bytes)
            .inspect_err(|err| log::error!("failed to decode `{}`: {err}", T::type_path()))
    }

    /// Decodes a value whose type is only known at runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use replay_serde::{JsonCodec, TypeDescriptor};
    ///
    /// let codec = JsonCodec::new();
    ///
    /// let list = codec.deserialize_dyn(br#"["linked-list","long",7]"#, TypeDescriptor::AnyList).unwrap();
    /// assert_eq!(list.reflect_type_path(), "linked-list");
    ///
    /// let leaf = codec.deserialize_dyn(b"7", TypeDescriptor::from("long")).unwrap();
    /// assert_eq!(leaf.take::<i64>().unwrap(), 7);
    ///
    /// let err = codec.deserialize_dyn(br#"["set","long",7]"#, TypeDescriptor::AnyList).unwrap_err();
    /// assert!(err.is_type_resolution());
    /// ```
    pub fn deserialize_dyn(
        &self,
        bytes: &[u8],
        descriptor: TypeDescriptor<'_>,
    ) -> Result<Box<dyn Reflect>, DecodingError> {
        self.decode_dyn(bytes, descriptor)
            .inspect_err(|err| log::error!("failed to decode `{descriptor}`: {err}"))
    }

    /// Decodes a payload into an existing value.
    ///
    /// A list or map target is cleared and refilled with the elements of the
    /// decoded container, keeping its own concrete type. A leaf target has the
    /// top-level fields present in the payload overwritten, the others are
    /// left as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use replay_serde::{JsonCodec, impls::ChainList};
    ///
    /// let codec = JsonCodec::new();
    ///
    /// let mut target = ChainList::new();
    /// target.push(String::from("stale"));
    ///
    /// codec.deserialize_into(br#"["array-backed-list","integer",1,"integer",2]"#, &mut target).unwrap();
    /// assert_eq!(target.len(), 2);
    /// assert_eq!(target.front().unwrap().downcast_ref::<i32>(), Some(&1));
    /// ```
    pub fn deserialize_into(&self, bytes: &[u8], target: &mut dyn Reflect) -> Result<(), DecodingError> {
        let expected = target.reflect_type_path();
        self.decode_into(bytes, target)
            .inspect_err(|err| log::error!("failed to decode into `{expected}`: {err}"))
    }

    fn decode_as<T: Reflect + TypePath>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        let payload = parse(bytes)?;
        let registry = self.registry.read();
        let Some(meta) = registry.get(TypeId::of::<T>()) else {
            return Err(TypeResolutionError::Unregistered {
                type_name: type_name::<T>(),
            }
            .into());
        };

        let value = DecodeDriver::new(&registry, &self.options).decode_with_meta(meta, payload)?;
        value.take::<T>().map_err(|value| DecodingError::TypeMismatch {
            expected: T::type_path(),
            found: value.reflect_type_path(),
        })
    }

    fn decode_dyn(&self, bytes: &[u8], descriptor: TypeDescriptor<'_>) -> Result<Box<dyn Reflect>, DecodingError> {
        let payload = parse(bytes)?;
        let registry = self.registry.read();
        let driver = DecodeDriver::new(&registry, &self.options);
        match descriptor {
            TypeDescriptor::AnyList => driver.decode_list(payload),
            TypeDescriptor::AnyMap => driver.decode_map(payload),
            TypeDescriptor::Path(type_path) => driver.decode_tagged(type_path, payload),
        }
    }

    fn decode_into(&self, bytes: &[u8], target: &mut dyn Reflect) -> Result<(), DecodingError> {
        let payload = parse(bytes)?;
        let registry = self.registry.read();
        let driver = DecodeDriver::new(&registry, &self.options);
        match target.reflect_mut() {
            ReflectMut::List(list) => refill_list(list, driver.decode_list(payload)?),
            ReflectMut::Map(map) => refill_map(map, driver.decode_map(payload)?),
            ReflectMut::Leaf(leaf) => base_codec::update_leaf(&driver, leaf, payload),
        }
    }
}

impl From<TypeRegistry> for JsonCodec {
    #[inline]
    fn from(registry: TypeRegistry) -> Self {
        Self::with_registry(TypeRegistryArc::new(registry))
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn parse(bytes: &[u8]) -> Result<Value, DecodingError> {
    serde_json::from_slice(bytes).map_err(DecodingError::Syntax)
}

fn refill_list(target: &mut dyn List, mut decoded: Box<dyn Reflect>) -> Result<(), DecodingError> {
    let found = decoded.reflect_type_path();
    let Some(source) = decoded.reflect_mut().into_list() else {
        return Err(DecodingError::TypeMismatch {
            expected: target.reflect_type_path(),
            found,
        });
    };

    target.clear();
    for element in source.drain() {
        target.push(element);
    }
    Ok(())
}

fn refill_map(target: &mut dyn Map, mut decoded: Box<dyn Reflect>) -> Result<(), DecodingError> {
    let found = decoded.reflect_type_path();
    let Some(source) = decoded.reflect_mut().into_map() else {
        return Err(DecodingError::TypeMismatch {
            expected: target.reflect_type_path(),
            found,
        });
    };

    target.clear();
    for (key, value) in source.drain() {
        target.insert(key, value);
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use ::serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::JsonCodec;
    use crate::impls::{ChainList, HashedMap, OrderedMap, VecList};
    use crate::ops::Map;
    use crate::registry::TypeRegistry;
    use crate::{CodecOptions, DecodingError, EncodingError, Reflect, TypeDescriptor, TypeResolutionError};

    #[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
    struct Profile {
        name: String,
        age: u32,
        #[serde(default)]
        tags: Vec<String>,
    }

    crate::impl_reflect_leaf!(Profile => "profile", PartialEq);

    fn codec() -> JsonCodec {
        let codec = JsonCodec::new();
        codec.register::<Profile>();
        codec
    }

    fn ann() -> Profile {
        Profile {
            name: String::from("ann"),
            age: 30,
            tags: Vec::new(),
        }
    }

    fn same(a: &dyn Reflect, b: &dyn Reflect) -> bool {
        a.reflect_eq(b).unwrap_or(false)
    }

    #[test]
    fn list_wire_format() {
        let codec = codec();

        let mut list = VecList::new();
        list.push(String::from("a"));
        list.push(3_i32);

        let bytes = codec.serialize(&list).unwrap();
        assert_eq!(bytes, br#"["array-backed-list","string","a","integer",3]"#);

        let back = codec.deserialize::<VecList>(&bytes).unwrap();
        assert!(same(&back, &list));
    }

    #[test]
    fn map_wire_format() {
        let codec = codec();

        let mut map = OrderedMap::new();
        map.insert(String::from("a"), 1_i32);
        map.insert(2_i64, ann());

        let tree = codec.encode(&map).unwrap();
        assert_eq!(
            tree,
            json!([
                { "mapType": "linked-hash-map" },
                { "keyType": "string" },
                { "valueType": "integer" },
                { "\"a\"": 1 },
                { "keyType": "long" },
                { "valueType": "profile" },
                { "2": { "name": "ann", "age": 30, "tags": [] } },
            ]),
        );

        let bytes = codec.serialize(&map).unwrap();
        let back = codec.deserialize::<OrderedMap>(&bytes).unwrap();
        assert!(same(&back, &map));
    }

    #[test]
    fn every_container_round_trips() {
        let codec = codec();

        let mut chain = ChainList::new();
        chain.push(1.5_f64);
        chain.push('x');
        let bytes = codec.serialize(&chain).unwrap();
        assert!(same(&codec.deserialize::<ChainList>(&bytes).unwrap(), &chain));

        let mut hashed = HashedMap::new();
        hashed.insert(1_u8, true);
        hashed.insert(String::from("k"), ann());
        let bytes = codec.serialize(&hashed).unwrap();
        assert!(same(&codec.deserialize::<HashedMap>(&bytes).unwrap(), &hashed));
    }

    #[test]
    fn nested_containers_keep_their_types() {
        let codec = codec();

        let mut inner = ChainList::new();
        inner.push(7_u64);

        let mut map = OrderedMap::new();
        map.insert(String::from("inner"), inner);

        let mut list = VecList::new();
        list.push(map);
        list.push(HashedMap::new());

        let bytes = codec.serialize(&list).unwrap();
        let back = codec.deserialize::<VecList>(&bytes).unwrap();
        assert!(same(&back, &list));

        let map = back.get(0).unwrap().downcast_ref::<OrderedMap>().unwrap();
        let inner = map.get(&String::from("inner")).unwrap();
        assert_eq!(inner.reflect_type_path(), "linked-list");
        assert!(back.get(1).unwrap().is::<HashedMap>());
    }

    #[test]
    fn null_slots_are_dropped() {
        let codec = codec();

        let mut list = VecList::new();
        list.push(1_i32);
        list.push_null();
        list.push(2_i32);
        assert_eq!(
            codec.serialize(&list).unwrap(),
            br#"["array-backed-list","integer",1,"integer",2]"#,
        );

        let mut map = OrderedMap::new();
        let dyn_map: &mut dyn Map = &mut map;
        dyn_map.insert(Some(Box::new(String::from("a"))), None);
        dyn_map.insert(None, Some(Box::new(1_i32)));
        dyn_map.insert(Some(Box::new(String::from("b"))), Some(Box::new(2_i32)));

        let bytes = codec.serialize(&map).unwrap();
        let back = codec.deserialize::<OrderedMap>(&bytes).unwrap();
        assert_eq!(back.len(), 1);
        assert!(back.get(&String::from("b")).is_some());
    }

    #[test]
    fn empty_containers() {
        let codec = codec();

        assert_eq!(codec.serialize(&VecList::new()).unwrap(), br#"["array-backed-list"]"#);
        assert_eq!(codec.deserialize::<VecList>(br#"["array-backed-list"]"#).unwrap().len(), 0);

        let bytes = codec.serialize(&OrderedMap::new()).unwrap();
        assert_eq!(bytes, br#"[{"mapType":"linked-hash-map"}]"#);
        assert!(codec.deserialize::<OrderedMap>(&bytes).unwrap().is_empty());

        let bare = codec.deserialize_dyn(b"[]", TypeDescriptor::AnyMap).unwrap();
        assert!(bare.is::<HashedMap>());
        assert!(codec.deserialize::<HashedMap>(b"[]").unwrap().is_empty());
    }

    #[test]
    fn unknown_identifiers() {
        let codec = codec();

        let err = codec
            .deserialize::<VecList>(br#"["array-backed-list","no-such-type",1]"#)
            .unwrap_err();
        assert!(err.is_type_resolution());

        let err = codec.deserialize_dyn(br#"["mystery-list"]"#, TypeDescriptor::AnyList).unwrap_err();
        assert!(matches!(
            err,
            DecodingError::TypeResolution(TypeResolutionError::Unknown { type_path }) if type_path == "mystery-list",
        ));

        let err = codec.deserialize_dyn(br#"["string"]"#, TypeDescriptor::AnyList).unwrap_err();
        assert!(matches!(
            err,
            DecodingError::TypeResolution(TypeResolutionError::KindMismatch { type_path: "string", .. }),
        ));
    }

    #[test]
    fn unregistered_types() {
        #[derive(Serialize, Deserialize, Debug)]
        struct Stranger;

        crate::impl_reflect_leaf!(Stranger => "stranger");

        let codec = JsonCodec::new();
        let mut list = VecList::new();
        list.push(Stranger);

        let err = codec.serialize(&list).unwrap_err();
        assert!(matches!(err, EncodingError::Unregistered { type_path: "stranger" }));

        let err = codec.deserialize::<Stranger>(b"null").unwrap_err();
        assert!(matches!(err, DecodingError::TypeResolution(TypeResolutionError::Unregistered { .. })));

        assert!(codec.register::<Stranger>());
        assert!(codec.serialize(&list).is_ok());
    }

    #[test]
    fn requested_type_must_match_payload() {
        let codec = codec();

        let err = codec.deserialize::<VecList>(br#"["linked-list"]"#).unwrap_err();
        assert!(matches!(
            err,
            DecodingError::TypeMismatch { expected: "array-backed-list", found: "linked-list" },
        ));
    }

    #[test]
    fn malformed_payloads() {
        let codec = codec();

        let err = codec.deserialize::<VecList>(b"not json").unwrap_err();
        assert!(matches!(err, DecodingError::Syntax(_)));

        let err = codec.deserialize_dyn(b"[]", TypeDescriptor::AnyList).unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "list", position: 0, .. }));

        let err = codec.deserialize::<VecList>(br#"["array-backed-list","integer"]"#).unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "list", position: 1, .. }));

        let err = codec.deserialize::<VecList>(br#"["array-backed-list",5,1]"#).unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "list", position: 1, .. }));

        let err = codec
            .deserialize::<HashedMap>(br#"[{"mapType":"hash-map"},{"keyType":"string"}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", .. }));

        let err = codec
            .deserialize::<HashedMap>(br#"[{"mapType":"hash-map"},{"keyType":1},{"valueType":"integer"},{"1":1}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", position: 1, .. }));

        let err = codec
            .deserialize::<HashedMap>(br#"[{"mapType":"hash-map"},{"keyType":"string"},{"valueType":"integer"},{"a":1}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", position: 3, .. }));

        let err = codec.deserialize_dyn(br#"[{"type":"hash-map"}]"#, TypeDescriptor::AnyMap).unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", position: 0, .. }));
    }

    #[test]
    fn entry_records_with_several_fields() {
        let codec = codec();

        let map = codec
            .deserialize::<HashedMap>(
                br#"[{"mapType":"hash-map"},{"keyType":"string"},{"valueType":"integer"},{"\"a\"":1,"\"b\"":2}]"#,
            )
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&String::from("a")).unwrap().downcast_ref::<i32>(), Some(&1));
        assert_eq!(map.get(&String::from("b")).unwrap().downcast_ref::<i32>(), Some(&2));

        let err = codec
            .deserialize::<HashedMap>(br#"[{"mapType":"hash-map"},{"keyType":"string"},{"valueType":"integer"},{}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "map", position: 3, .. }));
    }

    #[test]
    fn non_finite_floats_round_trip() {
        let codec = codec();

        let mut list = VecList::new();
        list.push(f64::NAN);
        list.push(f32::INFINITY);
        list.push(f64::NEG_INFINITY);

        let bytes = codec.serialize(&list).unwrap();
        assert_eq!(
            bytes,
            br#"["array-backed-list","double","NaN","float","Infinity","double","-Infinity"]"#,
        );

        let back = codec.deserialize::<VecList>(&bytes).unwrap();
        assert!(back.get(0).unwrap().downcast_ref::<f64>().unwrap().is_nan());
        assert_eq!(back.get(1).unwrap().downcast_ref::<f32>(), Some(&f32::INFINITY));
        assert_eq!(back.get(2).unwrap().downcast_ref::<f64>(), Some(&f64::NEG_INFINITY));
    }

    #[test]
    fn leaf_errors_name_the_type() {
        let codec = codec();

        let err = codec
            .deserialize::<VecList>(br#"["array-backed-list","integer","three"]"#)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Leaf { type_path: "integer", .. }));
    }

    #[test]
    fn leaf_overrides() {
        let codec = codec();
        codec.register_serializer::<i32, _>(|n| Ok(Value::from(alloc::format!("#{n}"))));
        codec.register_deserializer::<i32, _>(|payload| {
            payload
                .as_str()
                .and_then(|text| text.strip_prefix('#'))
                .and_then(|digits| digits.parse().ok())
                .ok_or_else(|| DecodingError::custom("expected `#<digits>`"))
        });

        let mut list = VecList::new();
        list.push(3_i32);
        list.push(3_i64);

        let bytes = codec.serialize(&list).unwrap();
        assert_eq!(bytes, br##"["array-backed-list","integer","#3","long",3]"##);
        assert!(same(&codec.deserialize::<VecList>(&bytes).unwrap(), &list));

        let err = codec.deserialize::<i32>(b"3").unwrap_err();
        assert!(matches!(err, DecodingError::Custom(_)));
    }

    #[test]
    fn container_overrides_win_over_structure() {
        let codec = codec();
        codec.register_serializer::<ChainList, _>(|list| Ok(Value::from(list.len())));
        codec.register_deserializer::<ChainList, _>(|payload| {
            let len = payload.as_u64().ok_or_else(|| DecodingError::custom("expected a length"))?;
            let mut list = ChainList::new();
            for _ in 0..len {
                list.push_null();
            }
            Ok(list)
        });

        let mut chain = ChainList::new();
        chain.push(1_i32);
        chain.push(2_i32);

        let mut outer = VecList::new();
        outer.push(chain);

        let bytes = codec.serialize(&outer).unwrap();
        assert_eq!(bytes, br#"["array-backed-list","linked-list",2]"#);

        let back = codec.deserialize::<VecList>(&bytes).unwrap();
        let chain = back.get(0).unwrap().downcast_ref::<ChainList>().unwrap();
        assert_eq!(chain.len(), 2);
        assert!(chain.front().is_none());
    }

    #[test]
    fn later_override_replaces_earlier() {
        let codec = codec();
        codec.register_serializer::<bool, _>(|_| Ok(Value::from("first")));
        codec.register_serializer::<bool, _>(|_| Ok(Value::from("second")));

        assert_eq!(codec.serialize(&true).unwrap(), br#""second""#);
    }

    #[test]
    fn overrides_for_conflicting_identifier_are_refused() {
        #[derive(Serialize, Deserialize, Debug)]
        struct Shadow(i32);

        crate::impl_reflect_leaf!(Shadow => "integer");

        let codec = codec();
        assert!(!codec.register_serializer::<Shadow, _>(|shadow| Ok(Value::from(shadow.0))));
        assert!(!codec.register_deserializer::<Shadow, _>(|_| Ok(Shadow(0))));
        assert!(codec.register_serializer::<Profile, _>(|profile| Ok(Value::from(profile.age))));

        assert_eq!(codec.serialize(&1_i32).unwrap(), b"1");
        assert_eq!(codec.serialize(&ann()).unwrap(), b"30");
    }

    #[test]
    fn deserialize_into_containers() {
        let codec = codec();

        let mut target = VecList::new();
        target.push(String::from("stale"));
        codec
            .deserialize_into(br#"["linked-list","integer",1,"integer",2]"#, &mut target)
            .unwrap();
        assert_eq!(target.len(), 2);
        assert_eq!(target.get(1).unwrap().downcast_ref::<i32>(), Some(&2));

        let mut target = HashedMap::new();
        target.insert(String::from("stale"), 0_i32);
        codec
            .deserialize_into(
                br#"[{"mapType":"linked-hash-map"},{"keyType":"string"},{"valueType":"integer"},{"\"fresh\"":1}]"#,
                &mut target,
            )
            .unwrap();
        assert_eq!(target.len(), 1);
        assert!(target.get(&String::from("stale")).is_none());
        assert!(target.get(&String::from("fresh")).is_some());

        let mut target = VecList::new();
        let err = codec
            .deserialize_into(br#"[{"mapType":"hash-map"}]"#, &mut target)
            .unwrap_err();
        assert!(matches!(err, DecodingError::Malformed { context: "list", .. }));
    }

    #[test]
    fn deserialize_into_leaves() {
        let codec = codec();

        let mut target = ann();
        codec.deserialize_into(br#"{"age":31}"#, &mut target).unwrap();
        assert_eq!(target.name, "ann");
        assert_eq!(target.age, 31);

        codec.deserialize_into(br#"{"tags":"admin","extra":true}"#, &mut target).unwrap();
        assert_eq!(target.tags, ["admin"]);

        let mut number = 1_i32;
        codec.deserialize_into(b"5", &mut number).unwrap();
        assert_eq!(number, 5);

        let err = codec.deserialize_into(br#"{"age":"old"}"#, &mut target).unwrap_err();
        assert!(matches!(err, DecodingError::Leaf { type_path: "profile", .. }));
        assert_eq!(target.age, 31);
    }

    #[test]
    fn deserialize_into_needs_an_encodable_target() {
        let codec = codec();
        codec.register_serializer::<Profile, _>(|_| Err(EncodingError::custom("sealed")));

        let mut target = ann();
        let err = codec.deserialize_into(br#"{"age":31}"#, &mut target).unwrap_err();
        assert!(matches!(
            err,
            DecodingError::Merge { type_path: "profile", source: EncodingError::Custom(_) },
        ));
        assert_eq!(target, ann());
    }

    #[test]
    fn strict_options() {
        let codec = codec().with_options(CodecOptions::STRICT);

        let err = codec.deserialize::<Profile>(br#"{"name":"ann","age":30,"extra":1}"#).unwrap_err();
        assert!(matches!(err, DecodingError::Leaf { type_path: "profile", .. }));

        let err = codec.deserialize::<Profile>(br#"{"name":"ann","age":30,"tags":"a"}"#).unwrap_err();
        assert!(matches!(err, DecodingError::Leaf { type_path: "profile", .. }));

        let lenient = codec.clone().with_options(CodecOptions::LENIENT);
        let profile = lenient
            .deserialize::<Profile>(br#"{"name":"ann","age":30,"tags":"a","extra":1}"#)
            .unwrap();
        assert_eq!(profile.tags, ["a"]);
    }

    #[test]
    fn clones_share_the_registry() {
        let codec = JsonCodec::from(TypeRegistry::new());
        let clone = codec.clone();
        assert!(clone.register::<Profile>());
        assert!(codec.serialize(&ann()).is_ok());
    }

    #[test]
    fn encode_while_registering() {
        let codec = codec();

        let mut list = VecList::new();
        list.push(String::from("a"));
        list.push(ann());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..64 {
                        let bytes = codec.serialize(&list).unwrap();
                        let back = codec.deserialize::<VecList>(&bytes).unwrap();
                        assert!(same(&back, &list));
                    }
                });
            }
            scope.spawn(|| {
                for round in 0..64_u64 {
                    codec.register_serializer::<u64, _>(move |n| Ok(Value::from(n + round)));
                }
            });
        });

        assert_eq!(codec.serialize(&1_u64).unwrap(), b"64");
    }
}
