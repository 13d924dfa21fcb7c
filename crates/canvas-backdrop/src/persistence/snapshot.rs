//! Snapshot serialization for the backdrop seed and style

use serde::{Deserialize, Serialize};

use crate::background::{BackgroundStyle, CanvasTheme};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::noise::Seed;

/// What a host stores to get the same background after a reload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSnapshot {
    /// Version for migration support
    pub version: u32,
    /// World seed
    pub seed: u64,
    /// Grid style at the time of the snapshot
    pub style: BackgroundStyle,
    /// Theme preset id, if the style came from one
    pub theme: Option<String>,
}

impl Default for BackdropSnapshot {
    /// Fields missing from stored JSON fall back to these, so an absent seed
    /// lands on the engine's default world rather than seed 0
    fn default() -> Self {
        Self {
            version: 0,
            seed: Seed::DEFAULT.0,
            style: BackgroundStyle::default(),
            theme: None,
        }
    }
}

impl BackdropSnapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new snapshot
    pub fn new(seed: u64, style: BackgroundStyle, theme: Option<String>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            seed,
            style,
            theme,
        }
    }

    /// Snapshot of an engine configuration
    pub fn from_config(config: &EngineConfig, theme: Option<&str>) -> Self {
        Self::new(config.seed, config.style.clone(), theme.map(str::to_owned))
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    ///
    /// Version 0 snapshots stored only a theme id; their style colors are
    /// rebuilt from the preset.
    pub fn migrate(&mut self) {
        if self.version == 0 {
            if let Some(theme) = self.theme.as_deref().and_then(CanvasTheme::from_id) {
                self.style.color = theme.dot_color;
                self.style.background = Some(theme.background);
            }
        }
        self.version = Self::CURRENT_VERSION;
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse, migrate and validate a stored snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        if snapshot.needs_migration() {
            log::debug!("migrating backdrop snapshot from v{}", snapshot.version);
            snapshot.migrate();
        }
        snapshot.style.validate()?;
        Ok(snapshot)
    }

    /// Write the seed and style into an engine configuration
    pub fn apply_to(&self, config: &mut EngineConfig) {
        config.seed = self.seed;
        config.style = self.style.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::GridVariant;
    use crate::error::BackdropError;
    use crate::math::Rgba;

    #[test]
    fn test_snapshot_creation() {
        let snapshot = BackdropSnapshot::new(42, BackgroundStyle::default(), None);
        assert_eq!(snapshot.version, BackdropSnapshot::CURRENT_VERSION);
        assert_eq!(snapshot.seed, 42);
        assert!(!snapshot.needs_migration());
    }

    #[test]
    fn test_snapshot_default() {
        let snapshot: BackdropSnapshot = Default::default();
        assert_eq!(snapshot.version, 0); // Default doesn't set CURRENT_VERSION
        assert!(snapshot.needs_migration());
    }

    #[test]
    fn test_snapshot_roundtrip_keeps_seed() {
        let style = BackgroundStyle {
            variant: GridVariant::Lines,
            base_gap: 48.0,
            ..Default::default()
        };
        let snapshot = BackdropSnapshot::new(u64::MAX - 3, style, Some("nord".into()));
        let json = snapshot.to_json().unwrap();
        let restored = BackdropSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_migrate_from_theme_only() {
        let restored =
            BackdropSnapshot::from_json(r#"{"version":0,"seed":9,"theme":"dracula"}"#).unwrap();
        assert_eq!(restored.version, BackdropSnapshot::CURRENT_VERSION);
        assert_eq!(restored.seed, 9);
        assert_eq!(restored.style.color, Rgba::rgb(0x44, 0x47, 0x5a));
        assert_eq!(restored.style.background, Some(Rgba::rgb(0x28, 0x2a, 0x36)));
    }

    #[test]
    fn test_snapshot_missing_seed_uses_default_world() {
        let restored = BackdropSnapshot::from_json(r#"{"version":0,"theme":"dracula"}"#).unwrap();
        assert_eq!(restored.seed, Seed::DEFAULT.0);
        assert_eq!(restored.seed, EngineConfig::default().seed);

        let mut config = EngineConfig::default().with_seed(7);
        restored.apply_to(&mut config);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_snapshot_rejects_invalid_style() {
        let err =
            BackdropSnapshot::from_json(r#"{"version":1,"style":{"baseGap":0}}"#).unwrap_err();
        assert!(matches!(err, BackdropError::InvalidStyle { .. }));
    }

    #[test]
    fn test_snapshot_apply_to_config() {
        let snapshot = BackdropSnapshot::new(5, BackgroundStyle::default(), None);
        let mut config = EngineConfig::default();
        snapshot.apply_to(&mut config);
        assert_eq!(config.seed, 5);

        let back = BackdropSnapshot::from_config(&config, Some("light"));
        assert_eq!(back.seed, 5);
        assert_eq!(back.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_snapshot_json_structure() {
        let json = BackdropSnapshot::new(1, BackgroundStyle::default(), None)
            .to_json()
            .unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"seed\""));
        assert!(json.contains("\"baseGap\""));
    }
}
