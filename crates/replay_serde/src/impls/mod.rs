//! Concrete types that can cross the codec.
//!
//! ## Containers
//!
//! | type           | identifier          | order             |
//! |----------------|---------------------|-------------------|
//! | [`VecList`]    | `array-backed-list` | index order       |
//! | [`ChainList`]  | `linked-list`       | link order        |
//! | [`OrderedMap`] | `linked-hash-map`   | insertion order   |
//! | [`HashedMap`]  | `hash-map`          | hash-table order  |
//!
//! ## Leaves
//!
//! - `bool` (`boolean`), `char` (`char`), `String` (`string`)
//! - `i8` `i16` `i32` `i64` (`byte` `short` `integer` `long`)
//! - `u8` `u16` `u32` `u64` (`unsigned-byte` ... `unsigned-long`)
//! - `f32` `f64` (`float` `double`)
//!
//! Any other serde type becomes a leaf through
//! [`impl_reflect_leaf!`](crate::impl_reflect_leaf).

// -----------------------------------------------------------------------------
// Modules

mod chain_list;
mod hashed_map;
mod leaf;
mod ordered_map;
mod vec_list;

// -----------------------------------------------------------------------------
// Exports

pub use chain_list::ChainList;
pub use hashed_map::HashedMap;
pub use ordered_map::OrderedMap;
pub use vec_list::VecList;
