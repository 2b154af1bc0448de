// -----------------------------------------------------------------------------
// Modules

mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use reflect::Reflect;

/// Returns the hasher used by [`Reflect::reflect_hash`] implementations.
///
/// The seed is fixed, so equal values hash equally in every process.
#[inline]
pub fn reflect_hasher() -> replay_utils::hash::FixedHasher {
    core::hash::BuildHasher::build_hasher(&replay_utils::hash::FixedHashState)
}
