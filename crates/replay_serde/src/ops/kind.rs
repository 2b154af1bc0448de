use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Map};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable view of a value as one of the container categories.
///
/// Obtained from [`Reflect::reflect_ref`].
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    List(&'a dyn List),
    Map(&'a dyn Map),
    Leaf(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns the [`ReflectKind`] of this view.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Leaf(_) => ReflectKind::Leaf,
        }
    }

    /// Returns the list view, if this is a list.
    #[inline]
    pub fn as_list(self) -> Option<&'a dyn List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the map view, if this is a map.
    #[inline]
    pub fn as_map(self) -> Option<&'a dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable view of a value as one of the container categories.
///
/// Obtained from [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Leaf(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// Returns the [`ReflectKind`] of this view.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Leaf(_) => ReflectKind::Leaf,
        }
    }

    /// Returns the list view, if this is a list.
    #[inline]
    pub fn into_list(self) -> Option<&'a mut dyn List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the map view, if this is a map.
    #[inline]
    pub fn into_map(self) -> Option<&'a mut dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}
