use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::{Deref, DerefMut};

use replay_utils::TypeIdMap;

use crate::info::{ReflectKind, TypePath};
use crate::registry::TypeTrait;

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime metadata of a registered type.
///
/// Holds the wire identifier, the [`ReflectKind`] and a [`TypeTrait`] table.
/// The table decides what the codec can do with the type: construct it,
/// serialize it, deserialize it, or hand it to a user override.
///
/// # Example
///
/// ```
/// # use replay_serde::{impls::OrderedMap, info::ReflectKind};
/// # use replay_serde::registry::{FromType, TypeMeta, TypeTraitDefault};
/// let mut meta = TypeMeta::of::<OrderedMap>(ReflectKind::Map);
/// meta.insert_trait::<TypeTraitDefault>(FromType::<OrderedMap>::from_type());
///
/// let empty = meta.get_trait::<TypeTraitDefault>().unwrap().default();
/// assert_eq!(empty.reflect_type_path(), "linked-hash-map");
/// ```
pub struct TypeMeta {
    type_path: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    kind: ReflectKind,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates a [`TypeMeta`] with an empty trait table.
    #[inline]
    pub fn of<T: TypePath>(kind: ReflectKind) -> Self {
        Self {
            type_path: T::type_path(),
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            kind,
            trait_table: TypeIdMap::new(),
        }
    }

    /// Returns the wire identifier.
    #[inline(always)]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the Rust name of the type, for diagnostics only.
    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the container category of the type.
    #[inline(always)]
    pub const fn kind(&self) -> ReflectKind {
        self.kind
    }

    /// Inserts or replaces a [`TypeTrait`].
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Returns a [`TypeTrait`] reference, or `None` if it doesn't exist.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .map(Deref::deref)
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Returns a mutable [`TypeTrait`] reference, or `None` if it doesn't exist.
    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .map(DerefMut::deref_mut)
            .and_then(<dyn TypeTrait>::downcast_mut)
    }

    /// Returns `true` if the [`TypeTrait`] exists.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Returns the number of [`TypeTrait`]s.
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("trait_len", &self.trait_table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A type that can produce its own [`TypeMeta`] for registration.
///
/// Leaves get this from [`impl_reflect_leaf!`](crate::impl_reflect_leaf),
/// the built-in containers implement it by hand.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider using `impl_reflect_leaf!` for `{Self}`"
)]
pub trait GetTypeMeta: TypePath {
    /// Returns the default [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;
}

// -----------------------------------------------------------------------------
// Tests
