//! Cosmetic jitter stream for hand-drawn wobble
//!
//! This is the only randomness in the engine that is allowed to change
//! between redraws. It only ever nudges stroke vertices of figure limbs,
//! never structure (which cells draw, what they draw, where). Tests turn it
//! off to compare frames bit for bit.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How the cosmetic jitter stream is sourced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitterMode {
    /// No wobble; strokes are straight
    Off,
    /// Reproducible stream derived from the world seed
    Seeded,
    /// Fresh OS entropy, different every session
    #[default]
    Entropy,
}

impl JitterMode {
    /// Parse from string ID (e.g., "off", "seeded")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "off" => Some(JitterMode::Off),
            "seeded" => Some(JitterMode::Seeded),
            "entropy" => Some(JitterMode::Entropy),
            _ => None,
        }
    }
}

/// Stream of cosmetic offsets
#[derive(Clone, Debug)]
pub struct JitterStream {
    rng: Option<SmallRng>,
}

impl JitterStream {
    /// Stream that always yields zero
    pub fn off() -> Self {
        Self { rng: None }
    }

    /// Reproducible stream
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Stream seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Some(SmallRng::from_entropy()),
        }
    }

    /// Build the stream for a configured mode
    pub fn for_mode(mode: JitterMode, seed: u64) -> Self {
        match mode {
            JitterMode::Off => Self::off(),
            JitterMode::Seeded => Self::seeded(seed ^ 0x5EED_0F_C0DE),
            JitterMode::Entropy => Self::from_entropy(),
        }
    }

    /// Whether this stream produces any wobble
    #[inline]
    pub fn is_active(&self) -> bool {
        self.rng.is_some()
    }

    /// Uniform offset in `[-amplitude, amplitude)`, zero when off
    #[inline]
    pub fn offset(&mut self, amplitude: f64) -> f64 {
        match self.rng.as_mut() {
            Some(rng) => (rng.gen::<f64>() - 0.5) * 2.0 * amplitude,
            None => 0.0,
        }
    }
}
