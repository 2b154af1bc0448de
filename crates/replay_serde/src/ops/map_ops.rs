use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Map trait

/// Iterator over the entries of a [`Map`].
pub type MapIter<'a> =
    Box<dyn Iterator<Item = (Option<&'a dyn Reflect>, Option<&'a dyn Reflect>)> + 'a>;

/// A type-erased key-value container.
///
/// Keys and values are heterogeneous and either may be null. Keys are
/// matched through [`Reflect::reflect_hash`] and [`Reflect::reflect_eq`];
/// a key that supports neither never matches another key.
///
/// The iteration order is the natural order of the implementation, which is
/// also the order entries are written to the wire.
///
/// # Examples
///
/// ```
/// use replay_serde::{impls::OrderedMap, ops::Map};
///
/// let mut ordered = OrderedMap::new();
/// let map: &mut dyn Map = &mut ordered;
///
/// map.insert(Some(Box::new(String::from("b"))), Some(Box::new(2_i32)));
/// map.insert(Some(Box::new(String::from("a"))), None);
///
/// assert_eq!(map.len(), 2);
/// assert!(map.get(&String::from("a")).is_none());
/// assert_eq!(map.get(&String::from("b")).unwrap().downcast_ref::<i32>(), Some(&2));
/// ```
pub trait Map: Reflect {
    /// Returns the number of entries, null entries included.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in the natural order of the map.
    fn iter(&self) -> MapIter<'_>;

    /// Looks up an entry.
    ///
    /// Returns `None` if the key is absent and `Some(None)` if it maps to null.
    fn get_entry(&self, key: Option<&dyn Reflect>) -> Option<Option<&dyn Reflect>>;

    /// Looks up the non-null value of a non-null key.
    #[inline]
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        self.get_entry(Some(key)).flatten()
    }

    /// Inserts an entry, returning the previous value slot if the key was present.
    fn insert(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Option<Option<Box<dyn Reflect>>>;

    /// Removes every entry, returning them in iteration order.
    fn drain(&mut self) -> Vec<(Option<Box<dyn Reflect>>, Option<Box<dyn Reflect>>)>;

    /// Removes every entry.
    fn clear(&mut self);
}

// -----------------------------------------------------------------------------
// Helpers

/// Hashes a map key.
///
/// The null key and keys that don't support hashing share a fixed bucket.
#[inline]
pub fn key_hash(key: Option<&dyn Reflect>) -> u64 {
    key.and_then(Reflect::reflect_hash).unwrap_or(0)
}

/// Compares two map keys.
#[inline]
pub fn key_eq(a: Option<&dyn Reflect>, b: Option<&dyn Reflect>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.reflect_eq(b).unwrap_or(false),
        _ => false,
    }
}

/// Compares a map with another value entry by entry, ignoring order.
///
/// Maps of different concrete types are never equal.
/// Returns `None` if a value does not support comparison.
pub fn map_eq(map: &dyn Map, other: &dyn Reflect) -> Option<bool> {
    if map.ty_id() != other.ty_id() {
        return Some(false);
    }
    let Some(other) = other.reflect_ref().as_map() else {
        return Some(false);
    };
    if map.len() != other.len() {
        return Some(false);
    }

    for (key, value) in map.iter() {
        match (value, other.get_entry(key)) {
            (_, None) => return Some(false),
            (None, Some(None)) => {}
            (Some(a), Some(Some(b))) => {
                if !a.reflect_eq(b)? {
                    return Some(false);
                }
            }
            _ => return Some(false),
        }
    }
    Some(true)
}

/// Formats a map as `{k: v, ...}`.
pub fn map_debug(map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(map.iter()).finish()
}
