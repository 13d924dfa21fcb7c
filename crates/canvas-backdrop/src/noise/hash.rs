//! Deterministic integer hashing for per-cell choices
//!
//! Cell decisions (motif type, point counts, offsets) must depend only on the
//! integer cell coordinate and the world seed, never on call order or the
//! platform's `sin` implementation. Everything here is integer mixing
//! (splitmix64 finalizer) converted to `[0, 1)` at the very end.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const COL_SALT: u64 = 0xD6E8_FEB8_6659_FD93;
const ROW_SALT: u64 = 0xA076_1D64_78BD_642F;

/// splitmix64 output function
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Map 64 random bits to `[0, 1)` using the top 53 bits
#[inline]
pub fn to_unit(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Reproducible pseudo-random value attached to one lattice cell
///
/// Cheap to copy; derive further independent values with [`CellHash::sub`]
/// instead of drawing from any shared generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellHash(u64);

impl CellHash {
    /// Hash an integer cell coordinate under a world seed
    #[inline]
    pub fn of(seed: u64, col: i64, row: i64) -> Self {
        let h = mix64(seed ^ (col as u64).wrapping_mul(COL_SALT));
        Self(mix64(h ^ (row as u64).wrapping_mul(ROW_SALT)))
    }

    /// Value in `[0, 1)`
    #[inline]
    pub fn unit(self) -> f64 {
        to_unit(self.0)
    }

    /// Value in `[-0.5, 0.5)`
    #[inline]
    pub fn centered(self) -> f64 {
        self.unit() - 0.5
    }

    /// Pick an index in `0..n` (`floor(unit * n)`); `n` must be > 0
    #[inline]
    pub fn pick(self, n: usize) -> usize {
        ((self.unit() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Derive an independent hash for sub-choice `index`
    #[inline]
    pub fn sub(self, index: u64) -> Self {
        Self(mix64(self.0 ^ mix64(index.wrapping_add(1))))
    }
}

/// Sequential splitmix64 generator
///
/// Used where a short deterministic sequence is needed (the noise
/// permutation shuffle). Output is stable across releases, which matters
/// because hosts persist seeds.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 64 random bits
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `0..bound` (multiply-high reduction)
    #[inline]
    pub fn next_below(&mut self, bound: u64) -> u64 {
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }
}
