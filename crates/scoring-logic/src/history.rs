//! Cumulative score curves for charting

use serde::{Deserialize, Serialize};
use crate::calculator::RoundResult;
use crate::ledger::Player;

/// Totals for one player, entry 0 is the base score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeries {
    pub name: String,
    pub totals: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistory {
    pub series: Vec<PlayerSeries>,
}

impl ScoreHistory {
    pub fn totals_of(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.totals.as_slice())
    }
}

/// One point of the score chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// `"{n}: {round name}"`, n 1-based.
    pub round_label: String,
    pub player: String,
    pub points: f64,
}

/// Fold per-round deltas into a running total per player.
///
/// A player without a record in some round contributes a zero delta there.
pub fn project_history(players: &[Player], results: &[RoundResult]) -> ScoreHistory {
    let series = players
        .iter()
        .map(|player| {
            let mut totals = Vec::with_capacity(results.len() + 1);
            let mut running = player.base_score;
            totals.push(running);
            for result in results {
                running += result.delta_of(&player.name).unwrap_or(0.0);
                totals.push(running);
            }
            PlayerSeries { name: player.name.clone(), totals }
        })
        .collect();

    ScoreHistory { series }
}

/// Flatten a history into chart points, one per (round, player).
///
/// The base-score entry is not charted. With `include_open_round == false`
/// the most recent round is left out, since it is usually still being
/// entered.
pub fn chart_points(
    history: &ScoreHistory,
    results: &[RoundResult],
    include_open_round: bool,
) -> Vec<ChartPoint> {
    let shown = if include_open_round {
        results.len()
    } else {
        results.len().saturating_sub(1)
    };

    let mut points = Vec::with_capacity(shown * history.series.len());
    for (i, result) in results.iter().take(shown).enumerate() {
        let round_label = format!("{}: {}", i + 1, result.name);
        for series in &history.series {
            if let Some(points_after) = series.totals.get(i + 1) {
                points.push(ChartPoint {
                    round_label: round_label.clone(),
                    player: series.name.clone(),
                    points: *points_after,
                });
            }
        }
    }
    points
}
