//! Seeded 2D permutation-table gradient noise

use super::hash::SplitMix64;

const TABLE_SIZE: usize = 256;

/// 2D gradient (Perlin-style) noise source
///
/// Owns one 512-entry permutation table (a seeded shuffle of `0..256`
/// stored twice so lookups never branch on wraparound). Immutable after
/// construction; re-seeding means building a new instance. Output is
/// periodic with period 256 on both axes.
#[derive(Clone)]
pub struct NoiseSource {
    seed: u64,
    perm: [u8; TABLE_SIZE * 2],
}

impl std::fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSource")
            .field("seed", &self.seed)
            .finish()
    }
}

impl NoiseSource {
    /// Build the permutation table with a Fisher-Yates shuffle driven by `seed`
    pub fn new(seed: u64) -> Self {
        let mut p = [0u8; TABLE_SIZE];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut rng = SplitMix64::new(seed);
        for i in (1..TABLE_SIZE).rev() {
            let j = rng.next_below(i as u64 + 1) as usize;
            p.swap(i, j);
        }

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & (TABLE_SIZE - 1)];
        }

        Self { seed, perm }
    }

    /// Seed this table was built from
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample noise at `(x, y)`, roughly in `[-1, 1]`
    ///
    /// Non-finite input returns `0.0`. Very large finite input is safe: the
    /// lattice index saturates and is floor-modded into the table, and the
    /// fractional offset degrades to zero rather than NaN.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }

        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = lattice_index(x_floor);
        let yi = lattice_index(y_floor);

        let xf = x - x_floor;
        let yf = y - y_floor;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize;
        let ab = p[a + 1] as usize;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize;
        let bb = p[b + 1] as usize;

        let g00 = grad(p[aa], xf, yf);
        let g10 = grad(p[ba], xf - 1.0, yf);
        let g01 = grad(p[ab], xf, yf - 1.0);
        let g11 = grad(p[bb], xf - 1.0, yf - 1.0);

        lerp(v, lerp(u, g00, g10), lerp(u, g01, g11))
    }
}

/// Floor-mod of an already floored coordinate into `0..256`
///
/// `as i64` saturates, and masking a two's complement value is a floor-mod,
/// so negative coordinates wrap the same way positive ones do.
#[inline]
fn lattice_index(floored: f64) -> usize {
    ((floored as i64) & (TABLE_SIZE as i64 - 1)) as usize
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
