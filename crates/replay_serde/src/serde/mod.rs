//! The JSON codec.
//!
//! # Overview
//!
//! - [`JsonCodec`]: the entry point, `serialize` / `deserialize` and friends.
//! - [`CodecOptions`]: how leniently leaf payloads are read.
//! - [`TypeDescriptor`]: the type a payload is decoded as, when it is only
//!   known at runtime.
//!
//! Encoding dispatches on [`Reflect::reflect_ref`]:
//!
//! 1. An encode override registered for the concrete type wins.
//! 2. Lists are written as `[list-type, type, payload, type, payload, ...]`.
//! 3. Maps are written as a `mapType` header followed by one
//!    `keyType` / `valueType` / entry triple per entry.
//! 4. Leaves go through their serde implementation.
//!
//! Every element, key and value is tagged with its own identifier, so
//! containers nest to any depth and may be heterogeneous. Decoding reverses
//! the process, resolving each identifier through the
//! [`TypeRegistry`](crate::registry::TypeRegistry).
//!
//! Null list elements and map entries with a null key or value are not
//! written.
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref

// -----------------------------------------------------------------------------
// Modules

mod base_codec;
mod codec;
mod descriptor;
mod driver;
mod lenient;
mod list_codec;
mod map_codec;
mod options;

use driver::{DecodeDriver, EncodeDriver};
use lenient::LenientDeserializer;

// -----------------------------------------------------------------------------
// Exports

pub use codec::JsonCodec;
pub use descriptor::TypeDescriptor;
pub use options::CodecOptions;
