//! Error types for the backdrop engine
//!
//! Rendering itself has no recoverable failure modes. Errors only come from
//! rejecting bad inputs before any geometry is produced, and from parsing
//! host-supplied configuration.

/// Errors that can occur while validating inputs or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    /// Viewport values would poison geometry (zoom <= 0, NaN, infinity).
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    /// Style parameters are out of range.
    #[error("invalid style: {reason}")]
    InvalidStyle { reason: String },

    /// Engine configuration is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A color string is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: {0:?}")]
    ColorParse(String),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackdropError {
    /// Create an invalid viewport error.
    pub fn viewport(reason: impl Into<String>) -> Self {
        Self::InvalidViewport {
            reason: reason.into(),
        }
    }

    /// Create an invalid style error.
    pub fn style(reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            reason: reason.into(),
        }
    }

    /// Create an invalid config error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, BackdropError>;
