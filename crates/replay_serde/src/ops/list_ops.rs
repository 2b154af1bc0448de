use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hasher;

use crate::Reflect;

// -----------------------------------------------------------------------------
// List trait

/// Iterator over the slots of a [`List`], `None` being a null slot.
pub type ListIter<'a> = Box<dyn Iterator<Item = Option<&'a dyn Reflect>> + 'a>;

/// A type-erased ordered sequence.
///
/// Elements are heterogeneous: every slot holds an arbitrary reflected value
/// or nothing at all (a null slot).
///
/// # Examples
///
/// ```
/// use replay_serde::{impls::ChainList, ops::List};
///
/// let mut chain = ChainList::new();
/// let list: &mut dyn List = &mut chain;
///
/// list.push(Some(Box::new(1_i64)));
/// list.push(None);
/// list.push(Some(Box::new(String::from("b"))));
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.iter().filter(Option::is_some).count(), 2);
/// ```
pub trait List: Reflect {
    /// Returns the number of slots, null slots included.
    fn len(&self) -> usize;

    /// Returns `true` if the list has no slots.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the slots in order.
    fn iter(&self) -> ListIter<'_>;

    /// Appends a slot to the back of the list.
    fn push(&mut self, element: Option<Box<dyn Reflect>>);

    /// Removes every slot, returning them in order.
    fn drain(&mut self) -> Vec<Option<Box<dyn Reflect>>>;

    /// Removes every slot.
    fn clear(&mut self);
}

// -----------------------------------------------------------------------------
// Helpers

/// Borrows a stored slot with the lifetime of the borrow.
#[inline]
pub(crate) fn slot_ref(slot: &Option<Box<dyn Reflect>>) -> Option<&dyn Reflect> {
    match slot {
        Some(value) => Some(&**value),
        None => None,
    }
}

/// Compares a list with another value, slot by slot.
///
/// Lists of different concrete types are never equal.
/// Returns `None` if an element does not support comparison.
pub fn list_eq(list: &dyn List, other: &dyn Reflect) -> Option<bool> {
    if list.ty_id() != other.ty_id() {
        return Some(false);
    }
    let Some(other) = other.reflect_ref().as_list() else {
        return Some(false);
    };
    if list.len() != other.len() {
        return Some(false);
    }

    for (a, b) in list.iter().zip(other.iter()) {
        match (a, b) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                if !a.reflect_eq(b)? {
                    return Some(false);
                }
            }
            _ => return Some(false),
        }
    }
    Some(true)
}

/// Hashes a list slot by slot.
///
/// Returns `None` if an element does not support hashing.
pub fn list_hash(list: &dyn List) -> Option<u64> {
    let mut hasher = crate::reflect_hasher();
    hasher.write(list.reflect_type_path().as_bytes());
    hasher.write_usize(list.len());
    for element in list.iter() {
        match element {
            None => hasher.write_u8(0),
            Some(value) => {
                hasher.write_u8(1);
                hasher.write_u64(value.reflect_hash()?);
            }
        }
    }
    Some(hasher.finish())
}

/// Formats a list as `[a, None, b]`.
pub fn list_debug(list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(list.iter()).finish()
}
