//! Errors raised while parsing setup input, configs and stored documents.
//!
//! Score calculation itself never fails; these only surface at the edges
//! where text or JSON is turned into typed input.

/// Largest supported number of decimals for display rounding.
pub const MAX_DISPLAY_DECIMALS: u32 = 6;

#[derive(Clone, Debug, PartialEq)]
pub enum ScoringError {
    /// The same player name was entered twice.
    DuplicatePlayer { name: String },
    /// A multiplier entry could not be parsed as a number.
    InvalidMultiplier { position: usize, text: String },
    /// NaN or infinity in a config field.
    NonFiniteValue { field: &'static str },
    /// Display decimals above `MAX_DISPLAY_DECIMALS`.
    InvalidDisplayDecimals { decimals: u32 },
    /// Bonus variant name not recognised.
    UnknownBonusVariant { name: String },
    /// Malformed JSON document or config.
    Json(String),
}

impl core::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScoringError::DuplicatePlayer { name } =>
                write!(f, "player '{}' entered more than once", name),
            ScoringError::InvalidMultiplier { position, text } =>
                write!(f, "invalid multiplier '{}' at position {}", text, position),
            ScoringError::NonFiniteValue { field } =>
                write!(f, "{} must be a finite number", field),
            ScoringError::InvalidDisplayDecimals { decimals } =>
                write!(f, "display decimals {} exceeds maximum of {}", decimals, MAX_DISPLAY_DECIMALS),
            ScoringError::UnknownBonusVariant { name } =>
                write!(f, "unknown bonus variant '{}'", name),
            ScoringError::Json(msg) => write!(f, "invalid JSON: {}", msg),
        }
    }
}

impl std::error::Error for ScoringError {}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::Json(err.to_string())
    }
}
