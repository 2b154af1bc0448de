use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use replay_utils::TypeIdMap;
use replay_utils::hash::{FixedHashState, HashMap};
use serde_json::Value;

use crate::impls::{ChainList, HashedMap, OrderedMap, VecList};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};
use crate::registry::{TypeTraitDecodeOverride, TypeTraitEncodeOverride};
use crate::{DecodingError, EncodingError, Reflect};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of the types that can cross the codec.
///
/// Every type identifier found in a payload is resolved here, and every
/// value being encoded looks up its serializer here. Types are indexed both
/// by [`TypeId`] and by their wire identifier, and an identifier can only
/// belong to one type.
///
/// # Example
///
/// ```
/// use replay_serde::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_path("array-backed-list").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let list = generator.default();
/// assert_eq!(list.reflect_type_path(), "array-backed-list");
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with the built-in types.
    ///
    /// - `bool` `char` `String`
    /// - `i8` - `i64`, `u8` - `u64`
    /// - `f32` `f64`
    /// - [`VecList`] [`ChainList`] [`OrderedMap`] [`HashedMap`]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<String>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<VecList>();
        registry.register::<ChainList>();
        registry.register::<OrderedMap>();
        registry.register::<HashedMap>();
        registry
    }

    // Returns `false` if the identifier already belongs to another type.
    fn add_type_path_index(&mut self, type_meta: &TypeMeta) -> bool {
        match self.type_path_to_id.get(type_meta.type_path()) {
            Some(&id) if id != type_meta.type_id() => {
                log::warn!(
                    "type identifier `{}` of `{}` is already used by another type, registration rejected",
                    type_meta.type_path(),
                    type_meta.type_name(),
                );
                false
            }
            Some(_) => true,
            None => {
                self.type_path_to_id
                    .insert(type_meta.type_path(), type_meta.type_id());
                true
            }
        }
    }

    /// Registers the type `T` if it has not been registered yet.
    ///
    /// Returns `false` if `T` was already registered, or if its identifier is
    /// already used by another type (a warning is logged in that case).
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use replay_serde::registry::TypeRegistry;
    /// #[derive(serde::Serialize, serde::Deserialize, Debug)]
    /// struct Session(u32);
    /// replay_serde::impl_reflect_leaf!(Session => "session");
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.register::<Session>());
    /// assert!(!registry.register::<Session>());
    /// assert!(registry.contains(TypeId::of::<Session>()));
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) -> bool {
        if self.contains(TypeId::of::<T>()) {
            return false;
        }
        self.insert_type_meta(T::get_type_meta())
    }

    /// Inserts or **overwrites** the [`TypeMeta`] of a type.
    ///
    /// Returns `false`, leaving the registry untouched, if the identifier is
    /// already used by another type.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        if !self.add_type_path_index(&type_meta) {
            return false;
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
        true
    }

    /// Registers the type trait `D` for type `T`, registering `T` first if needed.
    pub fn register_type_trait<T: GetTypeMeta, D: TypeTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            type_meta.insert_trait(D::from_type());
        }
    }

    /// Installs an encode override for `T`, registering `T` first if needed.
    ///
    /// A later call replaces the earlier override. Returns `false`, installing
    /// nothing, if `T` is not registered and its identifier belongs to another
    /// type.
    ///
    /// # Example
    ///
    /// ```
    /// # use replay_serde::{Reflect, registry::{TypeRegistry, TypeTraitEncodeOverride}};
    /// let mut registry = TypeRegistry::new();
    /// registry.register_serializer::<bool, _>(|b| Ok(serde_json::json!(if *b { "Y" } else { "N" })));
    ///
    /// let encoder = registry
    ///     .get_type_trait::<TypeTraitEncodeOverride>(true.ty_id())
    ///     .unwrap();
    /// assert_eq!(encoder.encode(&true).unwrap(), "Y");
    /// ```
    pub fn register_serializer<T, F>(&mut self, func: F) -> bool
    where
        T: GetTypeMeta + Reflect,
        F: Fn(&T) -> Result<Value, EncodingError> + Send + Sync + 'static,
    {
        self.register::<T>();
        let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) else {
            log::warn!(
                "encode override for `{}` dropped, `{}` could not be registered",
                core::any::type_name::<T>(),
                T::type_path(),
            );
            return false;
        };
        type_meta.insert_trait(TypeTraitEncodeOverride::new::<T, F>(func));
        log::debug!("installed encode override for `{}`", T::type_path());
        true
    }

    /// Installs a decode override for `T`, registering `T` first if needed.
    ///
    /// A later call replaces the earlier override. Returns `false` under the
    /// same conditions as [`TypeRegistry::register_serializer`].
    pub fn register_deserializer<T, F>(&mut self, func: F) -> bool
    where
        T: GetTypeMeta + Reflect,
        F: Fn(Value) -> Result<T, DecodingError> + Send + Sync + 'static,
    {
        self.register::<T>();
        let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) else {
            log::warn!(
                "decode override for `{}` dropped, `{}` could not be registered",
                core::any::type_name::<T>(),
                T::type_path(),
            );
            return false;
        };
        type_meta.insert_trait(TypeTraitDecodeOverride::new::<T, F>(func));
        log::debug!("installed decode override for `{}`", T::type_path());
        true
    }

    /// Whether the type with given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`] mutably.
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given wire identifier.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the [`TypeTrait`] `T` of the type with the given [`TypeId`].
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    /// Returns `true` if no type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A [`TypeRegistry`] shared between threads.
///
/// Encoding and decoding take the read lock, registrations take the write
/// lock. A poisoned lock is recovered, the registry holds no invariant a
/// panicking reader could break.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps a registry.
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<TypeRegistry> for TypeRegistryArc {
    #[inline]
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
