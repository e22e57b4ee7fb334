//! Errors raised while configuring the marquee.
//!
//! Per-frame math never returns errors; bad deltas are clamped and bad
//! layout reads keep the last known path.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarqueeError {
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid container dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("marquee config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MarqueeError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
