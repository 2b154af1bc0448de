use core::any::Any;

/// A capability stored in a [`TypeMeta`](crate::registry::TypeMeta) table.
///
/// Any `'static` thread-safe type can be used, the table is keyed by the
/// `TypeId` of the capability itself.
pub trait TypeTrait: Any + Send + Sync {}

impl<T: Any + Send + Sync> TypeTrait for T {}

impl dyn TypeTrait {
    /// Returns `true` if the capability is of type `T`.
    #[inline]
    pub fn is<T: TypeTrait>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    /// Downcasts the capability to type `T`.
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the capability to type `T` mutably.
    #[inline]
    pub fn downcast_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}
