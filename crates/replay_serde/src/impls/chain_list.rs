use alloc::boxed::Box;
use alloc::collections::LinkedList;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{ReflectKind, TypePath};
use crate::ops::{List, ListIter, ReflectMut, ReflectRef, list_debug, list_eq, list_hash, slot_ref};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

// -----------------------------------------------------------------------------
// ChainList

/// A heterogeneous list backed by a doubly-linked list.
///
/// Wire identifier: `linked-list`. Holds the same data as
/// [`VecList`](crate::impls::VecList); the two only differ in their concrete
/// type, which is what a replay has to reproduce.
#[derive(Default)]
pub struct ChainList {
    elements: LinkedList<Option<Box<dyn Reflect>>>,
}

impl ChainList {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            elements: LinkedList::new(),
        }
    }

    /// Appends a value to the back.
    #[inline]
    pub fn push<T: Reflect>(&mut self, value: T) {
        self.elements.push_back(Some(Box::new(value)));
    }

    /// Prepends a value to the front.
    #[inline]
    pub fn push_front<T: Reflect>(&mut self, value: T) {
        self.elements.push_front(Some(Box::new(value)));
    }

    /// Appends a null slot.
    #[inline]
    pub fn push_null(&mut self) {
        self.elements.push_back(None);
    }

    /// Returns the first non-null value, if the first slot holds one.
    #[inline]
    pub fn front(&self) -> Option<&dyn Reflect> {
        slot_ref(self.elements.front()?)
    }

    /// Returns the last non-null value, if the last slot holds one.
    #[inline]
    pub fn back(&self) -> Option<&dyn Reflect> {
        slot_ref(self.elements.back()?)
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

impl TypePath for ChainList {
    #[inline(always)]
    fn type_path() -> &'static str {
        "linked-list"
    }
}

impl List for ChainList {
    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn iter(&self) -> ListIter<'_> {
        Box::new(self.elements.iter().map(slot_ref))
    }

    #[inline]
    fn push(&mut self, element: Option<Box<dyn Reflect>>) {
        self.elements.push_back(element);
    }

    fn drain(&mut self) -> Vec<Option<Box<dyn Reflect>>> {
        core::mem::take(&mut self.elements).into_iter().collect()
    }

    #[inline]
    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl Reflect for ChainList {
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

impl fmt::Debug for ChainList {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        list_debug(self, f)
    }
}

impl GetTypeMeta for ChainList {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>(ReflectKind::List);
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

// -----------------------------------------------------------------------------
// Tests
