use thiserror::Error;

/// Failures that can occur while loading data or configuration.
///
/// The per-frame path never returns errors: missing or invalid inputs there
/// degrade to a resting visual state instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to parse spectrum data: {0}")]
    SpectrumParse(#[from] serde_json::Error),

    #[error("spectrum frame {index} has a non-finite timestamp")]
    NonFiniteTimestamp { index: usize },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
