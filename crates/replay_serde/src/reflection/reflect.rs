use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::ReflectKind;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The trait object every recorded value goes through.
///
/// A `dyn Reflect` knows its concrete wire identifier and which container
/// category it belongs to, which is everything the codec needs to write a
/// self-describing payload and to rebuild the same concrete type later.
///
/// # Implementing
///
/// Leaf types use [`impl_reflect_leaf!`](crate::impl_reflect_leaf):
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq, Hash)]
/// struct OrderId(u64);
///
/// replay_serde::impl_reflect_leaf!(OrderId => "order-id", Hash, PartialEq);
///
/// let id: Box<dyn replay_serde::Reflect> = Box::new(OrderId(7));
/// assert_eq!(id.reflect_type_path(), "order-id");
/// assert!(id.is::<OrderId>());
/// ```
///
/// Containers implement [`List`](crate::ops::List) or [`Map`](crate::ops::Map)
/// and return the matching [`ReflectRef`] variant, see
/// [`VecList`](crate::impls::VecList) for an example.
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// # use core::any::{Any, TypeId};
/// # use replay_serde::Reflect;
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Returns the wire identifier of the concrete type.
    fn reflect_type_path(&self) -> &'static str;

    /// Returns the [`TypeId`] of the concrete type.
    #[inline(always)]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Casts to the container capability of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Casts to the mutable container capability of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns the container category of this value.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_ref().kind()
    }

    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts a boxed value to a boxed reflected value.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Replaces `self` with `value`.
    ///
    /// Returns `value` back if it is not of the same concrete type.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Compares with another reflected value.
    ///
    /// Returns `None` if the type does not support comparison.
    /// Values of different concrete types are never equal.
    #[inline]
    fn reflect_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Hashes the value with [`reflect_hasher`](crate::reflect_hasher).
    ///
    /// Returns `None` if the type does not support hashing.
    #[inline]
    fn reflect_hash(&self) -> Option<u64> {
        None
    }

    /// Debug formatter for the value.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use replay_serde::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(String::from("a"));
    /// let x = x.take::<i32>().unwrap_err();
    /// assert_eq!(x.take::<String>().unwrap(), "a");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
