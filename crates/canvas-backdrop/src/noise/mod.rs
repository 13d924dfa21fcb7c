//! Noise and hashing primitives
//!
//! - [`NoiseSource`]: seeded gradient noise for spatially continuous gating
//! - [`CellHash`]: per-cell discrete choices, pure in `(seed, col, row)`
//! - [`JitterStream`]: cosmetic wobble, exempt from determinism

mod hash;
mod jitter;
mod perlin;

pub use hash::{mix64, to_unit, CellHash, SplitMix64};
pub use jitter::{JitterMode, JitterStream};
pub use perlin::NoiseSource;

/// World seed with helpers for persisted vs session-random backgrounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
    /// Seed used when the host supplies none
    pub const DEFAULT: Seed = Seed(42);

    /// Fresh seed from OS entropy (falls back to the default on failure)
    pub fn random() -> Self {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => Seed(u64::from_le_bytes(bytes)),
            Err(e) => {
                log::warn!("entropy unavailable ({}), using default seed", e);
                Self::DEFAULT
            }
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::DEFAULT
    }
}
