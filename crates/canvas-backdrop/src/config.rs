//! Engine configuration
//!
//! Hosts hand the engine one JSON document (camelCase keys). Every field is
//! optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "jitter": "entropy",
//!   "style": { "color": "#94a3b8", "baseGap": 60, "variant": "dots", "enabled": true },
//!   "grid": { "dotSizePx": 2.5, "dotsOpacityBoost": 1.5 },
//!   "scene": { "cellSize": 200, "tierThreshold": 0.5, "coarseStyle": "mixed" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::background::{BackgroundStyle, GridTuning};
use crate::error::Result;
use crate::noise::{JitterMode, Seed};
use crate::scene::SceneConfig;

/// Complete engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// World seed for noise and cell hashing
    pub seed: u64,
    /// Source of the cosmetic limb wobble
    pub jitter: JitterMode,
    pub style: BackgroundStyle,
    pub grid: GridTuning,
    pub scene: SceneConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: Seed::DEFAULT.0,
            jitter: JitterMode::default(),
            style: BackgroundStyle::default(),
            grid: GridTuning::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        self.grid.validate()?;
        self.scene.validate()
    }

    /// Builder-style seed setter
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder-style jitter setter
    pub fn with_jitter(mut self, jitter: JitterMode) -> Self {
        self.jitter = jitter;
        self
    }
}
