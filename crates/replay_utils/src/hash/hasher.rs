//! Provide `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is a `foldhash` hasher with a constant seed, so a recorded
//! value hashes the same way in the recording and the replaying process.
//!
//! `NoOpHasher` passes an already computed `u64` straight through.

use core::fmt::Debug;
use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5EED_0F_C0DEC_u64);

/// A hasher whose result only depends on its input.
///
/// A type alias for [`foldhash::fast::FoldHasher`], created through
/// [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use replay_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("key");
/// let b = FixedHashState.hash_one("key");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

impl FixedHashState {
    /// Hashes a single value, same as [`BuildHasher::hash_one`].
    #[inline]
    pub fn hash<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = FixedHashState.build_hasher();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that stores the last `u64` written to it.
///
/// Other writes fold the bytes in reverse order with a left rotation, so
/// `write_u32(10)` and `write_u64(10)` agree when called once.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s, used for keys that are already well distributed
/// such as [`TypeId`](core::any::TypeId).
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Tests
