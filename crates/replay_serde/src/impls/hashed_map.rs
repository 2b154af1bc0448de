use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use replay_utils::hash::HashTable;

use crate::Reflect;
use crate::info::{ReflectKind, TypePath};
use crate::ops::{Map, MapIter, ReflectMut, ReflectRef, key_eq, key_hash, map_debug, map_eq};
use crate::ops::slot_ref;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

type Entry = (Option<Box<dyn Reflect>>, Option<Box<dyn Reflect>>);

// -----------------------------------------------------------------------------
// HashedMap

/// A heterogeneous map stored directly in a hash table.
///
/// Wire identifier: `hash-map`. Iteration follows the table layout, which is
/// deterministic for a given sequence of insertions because keys are hashed
/// with a fixed seed.
///
/// This is also the map produced when a payload is the bare empty array.
///
/// # Examples
///
/// ```
/// use replay_serde::impls::HashedMap;
///
/// let mut map = HashedMap::new();
/// map.insert(7_u32, String::from("seven"));
///
/// assert_eq!(map.len(), 1);
/// assert_eq!(
///     map.get(&7_u32).unwrap().downcast_ref::<String>().unwrap(),
///     "seven",
/// );
/// ```
#[derive(Default)]
pub struct HashedMap {
    table: HashTable<Entry>,
}

impl HashedMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    /// Creates an empty map with at least the given capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
        }
    }

    /// Inserts a key-value pair, returning the previous value if any.
    #[inline]
    pub fn insert<K: Reflect, V: Reflect>(&mut self, key: K, value: V) -> Option<Box<dyn Reflect>> {
        self.insert_slot(Some(Box::new(key)), Some(Box::new(value)))
            .flatten()
    }

    /// Looks up the value of `key`.
    #[inline]
    pub fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        self.find(Some(key)).and_then(|(_, value)| slot_ref(value))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn find(&self, key: Option<&dyn Reflect>) -> Option<&Entry> {
        self.table
            .find(key_hash(key), |(other, _)| key_eq(slot_ref(other), key))
    }

    fn insert_slot(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Option<Option<Box<dyn Reflect>>> {
        let hash = key_hash(slot_ref(&key));
        let eq = |(other, _): &Entry| key_eq(slot_ref(other), slot_ref(&key));
        if let Some((_, old)) = self.table.find_mut(hash, eq) {
            return Some(core::mem::replace(old, value));
        }

        self.table
            .insert_unique(hash, (key, value), |(key, _)| key_hash(slot_ref(key)));
        None
    }
}

impl TypePath for HashedMap {
    #[inline(always)]
    fn type_path() -> &'static str {
        "hash-map"
    }
}

impl Map for HashedMap {
    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(
            self.table
                .iter()
                .map(|(key, value)| (slot_ref(key), slot_ref(value))),
        )
    }

    fn get_entry(&self, key: Option<&dyn Reflect>) -> Option<Option<&dyn Reflect>> {
        self.find(key).map(|(_, value)| slot_ref(value))
    }

    #[inline]
    fn insert(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Option<Option<Box<dyn Reflect>>> {
        self.insert_slot(key, value)
    }

    fn drain(&mut self) -> Vec<Entry> {
        self.table.drain().collect()
    }

    #[inline]
    fn clear(&mut self) {
        self.table.clear();
    }
}

impl Reflect for HashedMap {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        <Self as TypePath>::type_path()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        self
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_eq(&self, other: &dyn Reflect) -> Option<bool> {
        map_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        map_debug(self, f)
    }
}

impl fmt::Debug for HashedMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        map_debug(self, f)
    }
}

impl GetTypeMeta for HashedMap {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>(ReflectKind::Map);
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::HashedMap;
    use crate::Reflect;
    use crate::impls::OrderedMap;

    #[test]
    fn replaces_existing_value() {
        let mut map = HashedMap::new();
        assert!(map.insert(String::from("k"), 1_i32).is_none());

        let old = map.insert(String::from("k"), 2_i32).unwrap();
        assert_eq!(old.take::<i32>().unwrap(), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn keys_of_different_types_do_not_collide() {
        let mut map = HashedMap::new();
        map.insert(1_i32, String::from("int"));
        map.insert(1_i64, String::from("long"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1_i64).unwrap().downcast_ref::<String>().unwrap(), "long");
    }

    #[test]
    fn not_equal_to_ordered_map() {
        let mut a = HashedMap::new();
        a.insert(1_i32, 1_i32);
        let mut b = OrderedMap::new();
        b.insert(1_i32, 1_i32);

        assert_eq!(a.reflect_eq(&b), Some(false));
    }
}
