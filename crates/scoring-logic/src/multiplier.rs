//! Placement → multiplier lookup

use serde::{Deserialize, Serialize};
use crate::error::ScoringError;

/// Ordered multipliers, index 0 is first place.
///
/// Placements past the end of the table are worth nothing. That is the
/// prize line, not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiplierTable(Vec<f64>);

impl MultiplierTable {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Parse setup input such as `"3, 2, 1"`.
    ///
    /// Blank entries are skipped so trailing commas are harmless. Negative
    /// multipliers are accepted.
    pub fn parse(text: &str) -> Result<Self, ScoringError> {
        let mut values = Vec::new();
        for (i, raw) in text.split(',').enumerate() {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            let value: f64 = entry.parse().map_err(|_| ScoringError::InvalidMultiplier {
                position: i + 1,
                text: entry.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ScoringError::InvalidMultiplier {
                    position: i + 1,
                    text: entry.to_string(),
                });
            }
            values.push(value);
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for MultiplierTable {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Multiplier for a 1-based placement, `0.0` below the prize line.
///
/// Placement 0 is outside the domain and also maps to `0.0`.
pub fn multiplier_for(table: &MultiplierTable, placement: u32) -> f64 {
    placement
        .checked_sub(1)
        .and_then(|idx| table.0.get(idx as usize))
        .copied()
        .unwrap_or(0.0)
}
