//! Paths used by exported macros, so callers don't need `alloc` or `core`
//! imports of their own.

pub use alloc::boxed::Box;
pub use core::cmp::PartialEq;
pub use core::fmt::{Debug, Formatter, Result as FmtResult};
pub use core::hash::{Hash, Hasher};
pub use core::option::Option;
pub use core::result::Result;
