//! Container capabilities.
//!
//! - [`List`]: ordered sequences (e.g. [`VecList`](crate::impls::VecList)).
//! - [`Map`]: key-value containers (e.g. [`OrderedMap`](crate::impls::OrderedMap)).
//! - [`ReflectRef`] / [`ReflectMut`]: the result of asking a [`Reflect`]
//!   value which capability it has.
//!
//! Both container traits allow *null slots*: a list element or a map value of
//! `None`. Null slots exist in memory so a recorded container can be built as
//! it was observed; they are dropped when the container is encoded.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListIter, list_debug, list_eq, list_hash};
pub(crate) use list_ops::slot_ref;
pub use map_ops::{Map, MapIter, key_eq, key_hash, map_debug, map_eq};
