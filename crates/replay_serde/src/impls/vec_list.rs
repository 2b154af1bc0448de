use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{ReflectKind, TypePath};
use crate::ops::{List, ListIter, ReflectMut, ReflectRef, list_debug, list_eq, list_hash, slot_ref};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

// -----------------------------------------------------------------------------
// VecList

/// A heterogeneous list backed by a contiguous buffer.
///
/// Wire identifier: `array-backed-list`.
///
/// # Examples
///
/// ```
/// use replay_serde::impls::VecList;
///
/// let mut list = VecList::new();
/// list.push(String::from("a"));
/// list.push(3_i32);
/// list.push_null();
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1).unwrap().downcast_ref::<i32>(), Some(&3));
/// assert!(list.get(2).is_none());
/// ```
#[derive(Default)]
pub struct VecList {
    elements: Vec<Option<Box<dyn Reflect>>>,
}

impl VecList {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty list with at least the given capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value.
    #[inline]
    pub fn push<T: Reflect>(&mut self, value: T) {
        self.elements.push(Some(Box::new(value)));
    }

    /// Appends a boxed value.
    #[inline]
    pub fn push_boxed(&mut self, value: Box<dyn Reflect>) {
        self.elements.push(Some(value));
    }

    /// Appends a null slot.
    #[inline]
    pub fn push_null(&mut self) {
        self.elements.push(None);
    }

    /// Returns the value at `index`.
    ///
    /// Returns `None` if the index is out of bounds or the slot is null.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&dyn Reflect> {
        slot_ref(self.elements.get(index)?)
    }

    /// Returns the value at `index` mutably.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        match self.elements.get_mut(index)? {
            Some(value) => Some(&mut **value),
            None => None,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Box<dyn Reflect>> for VecList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Reflect>>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Some).collect(),
        }
    }
}

impl TypePath for VecList {
    #[inline(always)]
    fn type_path() -> &'static str {
        "array-backed-list"
    }
}

impl List for VecList {
    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn iter(&self) -> ListIter<'_> {
        Box::new(self.elements.iter().map(slot_ref))
    }

    #[inline]
    fn push(&mut self, element: Option<Box<dyn Reflect>>) {
        self.elements.push(element);
    }

    fn drain(&mut self) -> Vec<Option<Box<dyn Reflect>>> {
        core::mem::take(&mut self.elements)
    }

    #[inline]
    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl Reflect for VecList {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        <Self as TypePath>::type_path()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
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
        list_eq(self, other)
    }

    #[inline]
    fn reflect_hash(&self) -> Option<u64> {
        list_hash(self)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        list_debug(self, f)
    }
}

impl fmt::Debug for VecList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        list_debug(self, f)
    }
}

impl GetTypeMeta for VecList {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>(ReflectKind::List);
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
    use alloc::vec::Vec;

    use super::VecList;
    use crate::Reflect;
    use crate::impls::ChainList;
    use crate::ops::List;

    #[test]
    fn null_slots_are_kept_in_memory() {
        let mut list = VecList::new();
        list.push(1_i32);
        list.push_null();
        list.push(String::from("b"));

        let slots: Vec<bool> = List::iter(&list).map(|s| s.is_some()).collect();
        assert_eq!(slots, [true, false, true]);
    }

    #[test]
    fn equality_requires_same_list_type() {
        let a: VecList = [Box::new(1_i32) as Box<dyn Reflect>].into_iter().collect();
        let b: VecList = [Box::new(1_i32) as Box<dyn Reflect>].into_iter().collect();
        let mut c = ChainList::new();
        c.push(1_i32);

        assert_eq!(a.reflect_eq(&b), Some(true));
        assert_eq!(a.reflect_eq(&c), Some(false));
        assert_eq!(a.reflect_hash(), b.reflect_hash());
    }

    #[test]
    fn drain_and_clear() {
        let mut list = VecList::new();
        list.push(1_u8);
        list.push(2_u8);

        let drained = List::drain(&mut list);
        assert_eq!(drained.len(), 2);
        assert!(list.is_empty());

        list.push(3_u8);
        List::clear(&mut list);
        assert_eq!(list.len(), 0);
    }
}
