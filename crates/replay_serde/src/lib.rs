#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Exported macros refer to `$crate`, doc examples refer to `replay_serde`.
extern crate self as replay_serde;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{DecodingError, EncodingError, TypeResolutionError};
pub use reflection::{Reflect, reflect_hasher};
pub use crate::serde::{CodecOptions, JsonCodec, TypeDescriptor};
