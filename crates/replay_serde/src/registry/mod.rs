//! The type registry: everything the codec knows about a type identifier.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability stored for a type.
//! - [`FromType`]: builds a `TypeTrait` from a concrete type.
//! - [`TypeMeta`]: the identifier, kind and `TypeTrait` table of one type.
//! - [`GetTypeMeta`]: builds the default `TypeMeta` of a type.
//! - [`TypeRegistry`]: the table of registered types, keyed by `TypeId` and
//!   by identifier.
//! - [`TypeRegistryArc`]: a shareable, lock-protected registry.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: constructs an empty instance (containers).
//!     - [`TypeTraitSerialize`]: serde serialization behind `erased-serde`.
//!     - [`TypeTraitDeserialize`]: serde deserialization behind `erased-serde`.
//!     - [`TypeTraitEncodeOverride`]: a user encode function.
//!     - [`TypeTraitDecodeOverride`]: a user decode function.

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::TypeTraitDefault;
pub use traits::{TypeTraitDecodeOverride, TypeTraitEncodeOverride};
pub use traits::{TypeTraitDeserialize, TypeTraitSerialize};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
