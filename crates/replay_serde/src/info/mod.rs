//! Static type information: the wire identifier of a type and its kind.
//!
//! - [`TypePath`]: the stable identifier written into payloads.
//! - [`ReflectKind`]: whether a type is a list, a map or a leaf.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use kind::ReflectKind;
pub use type_path::TypePath;
