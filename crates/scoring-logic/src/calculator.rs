//! Score calculation engine
//!
//! Scores are never updated incrementally. Every call replays the whole
//! round list from the base scores, so whatever snapshot of the ledger the
//! caller hands in fully determines the output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use crate::bonus::{adjusted_delta, highest_index, lowest_index, select_recipients, BonusVariant};
use crate::history::{project_history, ScoreHistory};
use crate::ledger::{Player, Round};
use crate::multiplier::{multiplier_for, MultiplierTable};

/// One player's line in a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundRecord {
    pub name: String,
    pub stake: f64,
    pub placement: u32,
    /// Multiplier from the table, before any bonus.
    pub multiplier: f64,
    pub delta: f64,
    /// Running total after this round.
    pub total: f64,
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_index: usize,
    pub name: String,
    /// In player order.
    pub per_player: Vec<PlayerRoundRecord>,
    /// In player order, empty when nobody got the bonus.
    pub bonus_recipients: Vec<String>,
    pub leader: Option<String>,
    pub trailer: Option<String>,
    pub round_winner: Option<String>,
}

impl RoundResult {
    pub fn record_for(&self, name: &str) -> Option<&PlayerRoundRecord> {
        self.per_player.iter().find(|r| r.name == name)
    }

    pub fn delta_of(&self, name: &str) -> Option<f64> {
        self.record_for(name).map(|r| r.delta)
    }

    pub fn is_recipient(&self, name: &str) -> bool {
        self.bonus_recipients.iter().any(|r| r == name)
    }

    /// Whether the round winner was one of the bonus recipients.
    pub fn bonus_recipient_won_round(&self) -> bool {
        self.round_winner
            .as_deref()
            .is_some_and(|winner| self.is_recipient(winner))
    }
}

/// Final unrounded total for one player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub base_score: f64,
    pub total: f64,
}

/// Everything derived from one full recomputation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub final_scores: Vec<PlayerScore>,
    pub rounds: Vec<RoundResult>,
    pub history: ScoreHistory,
}

impl ScoreReport {
    pub fn total_of(&self, name: &str) -> Option<f64> {
        self.final_scores.iter().find(|s| s.name == name).map(|s| s.total)
    }

    /// Sum of every delta in every round.
    pub fn delta_sum(&self) -> f64 {
        self.rounds
            .iter()
            .flat_map(|r| r.per_player.iter())
            .map(|r| r.delta)
            .sum()
    }
}

/// Drop repeated names, keeping the first occurrence.
fn distinct_players(players: &[Player]) -> Vec<&Player> {
    let mut seen = HashSet::new();
    players
        .iter()
        .filter(|player| {
            let fresh = seen.insert(player.name.as_str());
            if !fresh {
                tracing::warn!(player = %player.name, "skipping duplicate player entry");
            }
            fresh
        })
        .collect()
}

/// Recompute all scores from the base scores and the full round list.
///
/// # Arguments
/// * `players` - Participants, in the order ties are broken
/// * `rounds` - Round ledger, oldest first
/// * `table` - Placement multipliers
/// * `variant` - Catch-up rule
///
/// Round entries naming somebody outside `players` are ignored; players
/// without an entry in a round default to stake 0 and placement 1.
pub fn compute_scores(
    players: &[Player],
    rounds: &[Round],
    table: &MultiplierTable,
    variant: BonusVariant,
) -> ScoreReport {
    let players = distinct_players(players);
    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    let known: HashSet<&str> = names.iter().copied().collect();

    let mut totals: Vec<f64> = players.iter().map(|p| p.base_score).collect();
    let mut results: Vec<RoundResult> = Vec::with_capacity(rounds.len());

    for (round_index, round) in rounds.iter().enumerate() {
        for stray in round.mentioned_names().filter(|name| !known.contains(name)) {
            tracing::warn!(round = round_index, player = stray, "ignoring entry for unknown player");
        }

        // Decided on the totals entering this round
        let recipients = select_recipients(variant, round_index, &totals);

        let mut per_player = Vec::with_capacity(names.len());
        let mut deltas = Vec::with_capacity(names.len());

        for (i, name) in names.iter().enumerate() {
            let stake = round.stake_of(name);
            let placement = round.placement_of(name);
            let multiplier = multiplier_for(table, placement);
            let delta = adjusted_delta(variant, recipients.contains(&i), stake, multiplier);

            totals[i] += delta;
            deltas.push(delta);
            per_player.push(PlayerRoundRecord {
                name: name.to_string(),
                stake,
                placement,
                multiplier,
                delta,
                total: totals[i],
            });
        }

        let pick = |idx: Option<usize>| idx.map(|i| names[i].to_string());
        let result = RoundResult {
            round_index,
            name: round.name.clone(),
            per_player,
            bonus_recipients: recipients.iter().map(|&i| names[i].to_string()).collect(),
            leader: pick(highest_index(&totals)),
            trailer: pick(lowest_index(&totals)),
            round_winner: pick(highest_index(&deltas)),
        };

        tracing::debug!(
            round = round_index,
            recipients = ?result.bonus_recipients,
            leader = ?result.leader,
            trailer = ?result.trailer,
            "round scored"
        );

        results.push(result);
    }

    let final_scores = players
        .iter()
        .zip(totals.iter())
        .map(|(player, total)| PlayerScore {
            name: player.name.clone(),
            base_score: player.base_score,
            total: *total,
        })
        .collect();

    let owned_players: Vec<Player> = players.into_iter().cloned().collect();
    let history = project_history(&owned_players, &results);

    ScoreReport {
        final_scores,
        rounds: results,
        history,
    }
}
