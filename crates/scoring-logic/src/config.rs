//! Game-wide settings shared by the scoring and display side

use serde::{Deserialize, Serialize};
use crate::bonus::BonusVariant;
use crate::error::{ScoringError, MAX_DISPLAY_DECIMALS};
use crate::ledger::DEFAULT_BASE_SCORE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score every player starts from.
    pub base_score: f64,
    /// Catch-up rule.
    pub bonus: BonusVariant,
    /// Decimals shown in the score table.
    pub display_decimals: u32,
}

impl GameConfig {
    /// Plain stakes times multipliers, no catch-up.
    pub fn classic() -> Self {
        Self { bonus: BonusVariant::None, ..Self::default() }
    }

    /// Last place plays the next round with a doubled multiplier.
    pub fn rubber_band() -> Self {
        Self { bonus: BonusVariant::DoubleLastPlace, ..Self::default() }
    }

    /// Everyone tied for last cannot lose points next round.
    pub fn shielded() -> Self {
        Self { bonus: BonusVariant::ShieldAllTiedLast, ..Self::default() }
    }

    /// Parse and validate a JSON config; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_json`, but blank input means the default config.
    pub fn from_json_or_default(json: &str) -> Result<Self, ScoringError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(json)
    }

    pub fn to_json(&self) -> Result<String, ScoringError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !self.base_score.is_finite() {
            return Err(ScoringError::NonFiniteValue { field: "base_score" });
        }
        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(ScoringError::InvalidDisplayDecimals { decimals: self.display_decimals });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_score: DEFAULT_BASE_SCORE,
            bonus: BonusVariant::ShieldAllTiedLast,
            display_decimals: 1,
        }
    }
}
