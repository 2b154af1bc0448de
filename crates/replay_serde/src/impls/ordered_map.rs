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
// OrderedMap

/// A heterogeneous map that iterates in insertion order.
///
/// Wire identifier: `linked-hash-map`.
///
/// Entries live in a vector in the order their key was first inserted, and a
/// hash table of indices serves lookups. Re-inserting an existing key replaces
/// the value but keeps the original position.
///
/// # Examples
///
/// ```
/// use replay_serde::impls::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(String::from("z"), 1_i32);
/// map.insert(String::from("a"), 2_i32);
/// map.insert(String::from("z"), 3_i32);
///
/// let keys: Vec<&str> = map
///     .keys()
///     .map(|k| k.unwrap().downcast_ref::<String>().unwrap().as_str())
///     .collect();
/// assert_eq!(keys, ["z", "a"]);
/// assert_eq!(map.get(&String::from("z")).unwrap().downcast_ref::<i32>(), Some(&3));
/// ```
#[derive(Default)]
pub struct OrderedMap {
    entries: Vec<Entry>,
    indices: HashTable<usize>,
}

impl OrderedMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    /// Creates an empty map with at least the given capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
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
        self.find(Some(key)).and_then(|index| slot_ref(&self.entries[index].1))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Option<&dyn Reflect>> {
        self.entries.iter().map(|(key, _)| slot_ref(key))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, key: Option<&dyn Reflect>) -> Option<usize> {
        let entries = &self.entries;
        self.indices
            .find(key_hash(key), |&index| key_eq(slot_ref(&entries[index].0), key))
            .copied()
    }

    fn insert_slot(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Option<Option<Box<dyn Reflect>>> {
        if let Some(index) = self.find(slot_ref(&key)) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }

        let index = self.entries.len();
        let hash = key_hash(slot_ref(&key));
        self.entries.push((key, value));

        let entries = &self.entries;
        self.indices
            .insert_unique(hash, index, |&i| key_hash(slot_ref(&entries[i].0)));
        None
    }
}

impl TypePath for OrderedMap {
    #[inline(always)]
    fn type_path() -> &'static str {
        "linked-hash-map"
    }
}

impl Map for OrderedMap {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> MapIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (slot_ref(key), slot_ref(value))),
        )
    }

    fn get_entry(&self, key: Option<&dyn Reflect>) -> Option<Option<&dyn Reflect>> {
        self.find(key).map(|index| slot_ref(&self.entries[index].1))
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
        self.indices.clear();
        core::mem::take(&mut self.entries)
    }

    fn clear(&mut self) {
        self.indices.clear();
        self.entries.clear();
    }
}

impl Reflect for OrderedMap {
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

impl fmt::Debug for OrderedMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        map_debug(self, f)
    }
}

impl GetTypeMeta for OrderedMap {
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
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::OrderedMap;
    use crate::Reflect;
    use crate::ops::Map;

    #[test]
    fn null_key_and_value() {
        let mut map = OrderedMap::new();
        let dyn_map: &mut dyn Map = &mut map;

        assert!(dyn_map.insert(None, Some(Box::new(1_i32))).is_none());
        assert!(dyn_map.insert(Some(Box::new(2_i32)), None).is_none());

        let two: &dyn Reflect = &2_i32;
        let three: &dyn Reflect = &3_i32;
        assert!(dyn_map.get_entry(None).unwrap().is_some());
        assert!(matches!(dyn_map.get_entry(Some(two)), Some(None)));
        assert!(dyn_map.get_entry(Some(three)).is_none());
    }

    #[test]
    fn unhashable_keys_are_found_by_equality() {
        let mut map = OrderedMap::new();
        map.insert(1.5_f64, String::from("a"));
        map.insert(2.5_f64, String::from("b"));
        map.insert(1.5_f64, String::from("c"));

        assert_eq!(map.len(), 2);
        let value = map.get(&1.5_f64).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "c");
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = OrderedMap::new();
        a.insert(1_i32, 10_i32);
        a.insert(2_i32, 20_i32);

        let mut b = OrderedMap::new();
        b.insert(2_i32, 20_i32);
        b.insert(1_i32, 10_i32);

        assert_eq!(a.reflect_eq(&b), Some(true));

        b.insert(1_i32, 11_i32);
        assert_eq!(a.reflect_eq(&b), Some(false));
    }

    #[test]
    fn drain_then_reuse() {
        let mut map = OrderedMap::new();
        map.insert(String::from("k"), 1_u8);

        let drained = Map::drain(&mut map);
        assert_eq!(drained.len(), 1);
        assert!(map.get(&String::from("k")).is_none());

        map.insert(String::from("k"), 2_u8);
        assert_eq!(map.len(), 1);
    }
}
