// -----------------------------------------------------------------------------
// Modules

mod default;
mod deserialize;
mod overrides;
mod serialize;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use deserialize::TypeTraitDeserialize;
pub use overrides::{TypeTraitDecodeOverride, TypeTraitEncodeOverride};
pub use serialize::TypeTraitSerialize;
