//! Rubber-banding bonus rules
//!
//! Every variant looks at the running totals as they stood *before* the
//! round being scored. Round 0 never has a recipient.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::error::ScoringError;

/// Which catch-up rule a game plays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusVariant {
    /// No bonus at all.
    None,
    /// The single lowest player gets their multiplier doubled.
    DoubleLastPlace,
    /// Everyone tied for last is shielded from a negative delta.
    ShieldAllTiedLast,
}

impl BonusVariant {
    pub const ALL: [BonusVariant; 3] = [
        BonusVariant::None,
        BonusVariant::DoubleLastPlace,
        BonusVariant::ShieldAllTiedLast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BonusVariant::None => "None",
            BonusVariant::DoubleLastPlace => "DoubleLastPlace",
            BonusVariant::ShieldAllTiedLast => "ShieldAllTiedLast",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BonusVariant::None => "No catch-up rule.",
            BonusVariant::DoubleLastPlace => "Last place gets a doubled multiplier next round.",
            BonusVariant::ShieldAllTiedLast => "Everyone tied for last cannot lose points next round.",
        }
    }
}

impl core::fmt::Display for BonusVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BonusVariant {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BonusVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| ScoringError::UnknownBonusVariant { name: s.to_string() })
    }
}

/// Indices of the bonus recipients for round `round_index`.
///
/// `totals` are the running totals entering the round, in player order.
/// The returned indices are in player order as well.
pub fn select_recipients(variant: BonusVariant, round_index: usize, totals: &[f64]) -> Vec<usize> {
    if round_index == 0 {
        return Vec::new();
    }

    match variant {
        BonusVariant::None => Vec::new(),
        BonusVariant::DoubleLastPlace => lowest_index(totals).into_iter().collect(),
        BonusVariant::ShieldAllTiedLast => {
            let Some(low) = lowest_index(totals).map(|i| totals[i]) else {
                return Vec::new();
            };
            totals
                .iter()
                .enumerate()
                .filter(|(_, total)| **total == low)
                .map(|(i, _)| i)
                .collect()
        }
    }
}

/// Delta for one player, bonus applied.
pub fn adjusted_delta(variant: BonusVariant, is_recipient: bool, stake: f64, multiplier: f64) -> f64 {
    if !is_recipient {
        return stake * multiplier;
    }

    match variant {
        BonusVariant::None => stake * multiplier,
        // Doubles the multiplier, not the delta
        BonusVariant::DoubleLastPlace => stake * (multiplier * 2.0),
        BonusVariant::ShieldAllTiedLast => (stake * multiplier).max(0.0),
    }
}

/// First index holding the minimum value.
pub(crate) fn lowest_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, value) in values.iter().enumerate() {
        match best {
            Some(b) if *value >= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// First index holding the maximum value.
pub(crate) fn highest_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, value) in values.iter().enumerate() {
        match best {
            Some(b) if *value <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
