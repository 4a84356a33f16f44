//! Players, rounds and the game record they live in
//!
//! These are the inputs the calculator reads. They are owned and edited by
//! whoever hosts the game; nothing here is derived.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use crate::bonus::BonusVariant;
use crate::calculator::{compute_scores, ScoreReport};
use crate::error::ScoringError;
use crate::multiplier::MultiplierTable;

/// Starting score every player gets.
pub const DEFAULT_BASE_SCORE: f64 = 20.0;

/// Stake assumed for a player missing from a round.
pub const DEFAULT_STAKE: f64 = 0.0;

/// Placement assumed for a player missing from a round.
pub const DEFAULT_PLACEMENT: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub base_score: f64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_base_score(name, DEFAULT_BASE_SCORE)
    }

    pub fn with_base_score(name: impl Into<String>, base_score: f64) -> Self {
        Self { name: name.into(), base_score }
    }
}

/// One round of the game: what everybody staked and where they finished.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    #[serde(default)]
    pub stakes: BTreeMap<String, f64>,
    #[serde(default)]
    pub placements: BTreeMap<String, u32>,
}

impl Round {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Builder form used mostly by tests and fixtures.
    pub fn with_entry(mut self, player: &str, stake: f64, placement: u32) -> Self {
        self.set_stake(player, stake);
        self.set_placement(player, placement);
        self
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_stake(&mut self, player: &str, stake: f64) {
        self.stakes.insert(player.to_string(), stake);
    }

    pub fn set_placement(&mut self, player: &str, placement: u32) {
        self.placements.insert(player.to_string(), placement);
    }

    pub fn stake_of(&self, player: &str) -> f64 {
        self.stakes.get(player).copied().unwrap_or(DEFAULT_STAKE)
    }

    pub fn placement_of(&self, player: &str) -> u32 {
        self.placements.get(player).copied().unwrap_or(DEFAULT_PLACEMENT)
    }

    /// Names mentioned in this round, stakes first, without repeats.
    pub fn mentioned_names(&self) -> impl Iterator<Item = &str> {
        let staked = self.stakes.keys().map(String::as_str);
        let placed = self
            .placements
            .keys()
            .map(String::as_str)
            .filter(move |name| !self.stakes.contains_key(*name));
        staked.chain(placed)
    }
}

/// Default name for the `count`-th round (1-based).
pub fn round_name(count: usize) -> String {
    format!("Runde {}", count)
}

/// Parse the setup text area: one player per line.
///
/// Blank lines are skipped; every name gets `base_score`.
pub fn parse_player_names(text: &str, base_score: f64) -> Result<Vec<Player>, ScoringError> {
    let mut seen = HashSet::new();
    let mut players = Vec::new();

    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            return Err(ScoringError::DuplicatePlayer { name: name.to_string() });
        }
        players.push(Player::with_base_score(name, base_score));
    }

    Ok(players)
}

/// A complete game record as the host keeps it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub players: Vec<Player>,
    pub multipliers: MultiplierTable,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Game {
    pub fn new(players: Vec<Player>, multipliers: MultiplierTable) -> Self {
        Self { players, multipliers, rounds: Vec::new() }
    }

    /// Build a game straight from the two setup inputs.
    pub fn setup(names: &str, multipliers: &str, base_score: f64) -> Result<Self, ScoringError> {
        let players = parse_player_names(names, base_score)?;
        let multipliers = MultiplierTable::parse(multipliers)?;
        Ok(Self::new(players, multipliers))
    }

    /// Append an empty round with the next default name, returning its index.
    pub fn add_round(&mut self) -> usize {
        let name = round_name(self.rounds.len() + 1);
        self.rounds.push(Round::new(name));
        self.rounds.len() - 1
    }

    pub fn round_mut(&mut self, index: usize) -> Option<&mut Round> {
        self.rounds.get_mut(index)
    }

    /// Recompute every score from scratch.
    pub fn scores(&self, bonus: BonusVariant) -> ScoreReport {
        compute_scores(&self.players, &self.rounds, &self.multipliers, bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_defaults() {
        let round = Round::new("Runde 1").with_entry("Anna", 2.0, 3);
        assert_eq!(round.stake_of("Anna"), 2.0);
        assert_eq!(round.placement_of("Anna"), 3);
        assert_eq!(round.stake_of("Bernd"), DEFAULT_STAKE);
        assert_eq!(round.placement_of("Bernd"), DEFAULT_PLACEMENT);
    }

    #[test]
    fn test_mentioned_names_deduplicated() {
        let mut round = Round::new("R");
        round.set_stake("A", 1.0);
        round.set_placement("A", 2);
        round.set_placement("B", 1);
        let names: Vec<_> = round.mentioned_names().collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_player_names() {
        let players = parse_player_names("  Anna \n\nBernd\n  \nCarla\n", 20.0).unwrap();
        let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Bernd", "Carla"]);
        assert!(players.iter().all(|p| p.base_score == 20.0));
    }

    #[test]
    fn test_parse_player_names_rejects_duplicates() {
        let err = parse_player_names("Anna\nBernd\n Anna", 20.0).unwrap_err();
        assert_eq!(err, ScoringError::DuplicatePlayer { name: "Anna".to_string() });
    }

    #[test]
    fn test_add_round_names() {
        let mut game = Game::setup("A\nB", "3,1", DEFAULT_BASE_SCORE).unwrap();
        assert_eq!(game.add_round(), 0);
        assert_eq!(game.add_round(), 1);
        assert_eq!(game.rounds[0].name, "Runde 1");
        assert_eq!(game.rounds[1].name, "Runde 2");

        game.round_mut(1).unwrap().rename("Sackhüpfen");
        assert_eq!(game.rounds[1].name, "Sackhüpfen");
        assert!(game.round_mut(2).is_none());
    }

    #[test]
    fn test_setup_propagates_parse_errors() {
        assert!(matches!(
            Game::setup("A", "3,x", DEFAULT_BASE_SCORE),
            Err(ScoringError::InvalidMultiplier { .. })
        ));
        assert!(matches!(
            Game::setup("A\nA", "3", DEFAULT_BASE_SCORE),
            Err(ScoringError::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn test_game_scores_delegates_to_calculator() {
        let mut game = Game::setup("A\nB", "3,1", DEFAULT_BASE_SCORE).unwrap();
        let idx = game.add_round();
        let round = game.round_mut(idx).unwrap();
        round.set_stake("A", 2.0);
        round.set_placement("B", 2);
        round.set_stake("B", 1.0);

        let report = game.scores(BonusVariant::None);
        assert_eq!(report.total_of("A"), Some(26.0));
        assert_eq!(report.total_of("B"), Some(21.0));
    }

    #[test]
    fn test_round_json_missing_maps_default() {
        let round: Round = serde_json::from_str(r#"{"name": "Runde 3"}"#).unwrap();
        assert!(round.stakes.is_empty());
        assert!(round.placements.is_empty());
    }
}
