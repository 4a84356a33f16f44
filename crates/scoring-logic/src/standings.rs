//! Leaderboard rows for the score table
//!
//! This is the only place values get rounded. Totals inside the report stay
//! unrounded, so rounding never feeds back into later rounds.

use serde::{Deserialize, Serialize};
use crate::calculator::ScoreReport;

/// Marker appended to a cell when the player had the bonus that round.
pub const BONUS_MARKER: char = '★';

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingCell {
    pub round_name: String,
    pub stake: f64,
    pub placement: u32,
    /// Rounded for display.
    pub delta: f64,
    pub bonus: bool,
    /// `"E: {stake} | P: {placement} | {delta}"`, starred for bonus rounds.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based position on the board.
    pub rank: usize,
    pub player: String,
    /// Rounded for display.
    pub points: f64,
    /// Newest round first.
    pub cells: Vec<StandingCell>,
}

fn cell_label(stake: f64, placement: u32, delta: f64, decimals: u32, bonus: bool) -> String {
    let sign = if delta > 0.0 { "+" } else { "" };
    let mut label = format!(
        "E: {} | P: {} | {}{:.*}",
        stake, placement, sign, decimals as usize, delta
    );
    if bonus {
        label.push(BONUS_MARKER);
    }
    label
}

/// Build the leaderboard, highest total first.
///
/// Equal totals keep player order.
pub fn standings(report: &ScoreReport, decimals: u32) -> Vec<StandingRow> {
    let mut order: Vec<_> = report.final_scores.iter().collect();
    order.sort_by(|a, b| b.total.total_cmp(&a.total));

    order
        .into_iter()
        .enumerate()
        .map(|(pos, score)| {
            let cells = report
                .rounds
                .iter()
                .rev()
                .filter_map(|round| {
                    let record = round.record_for(&score.name)?;
                    let delta = round_to(record.delta, decimals);
                    let bonus = round.is_recipient(&score.name);
                    Some(StandingCell {
                        round_name: round.name.clone(),
                        stake: record.stake,
                        placement: record.placement,
                        delta,
                        bonus,
                        label: cell_label(record.stake, record.placement, delta, decimals, bonus),
                    })
                })
                .collect();

            StandingRow {
                rank: pos + 1,
                player: score.name.clone(),
                points: round_to(score.total, decimals),
                cells,
            }
        })
        .collect()
}
