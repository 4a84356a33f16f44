//! Scoring Logic for Vatertagsspiele
//!
//! Players stake points each round, finish on a placement, and win
//! `stake × multiplier` for that placement. An optional catch-up rule
//! helps whoever is trailing. Scores are always recomputed from the full
//! round list.
//!
//! This crate is compiled to:
//! - Native (for tests and any host tooling)
//! - WASM (for the live score display)

mod bonus;
mod calculator;
mod config;
mod document;
mod error;
mod history;
mod ledger;
mod multiplier;
mod standings;

#[cfg(feature = "wasm")]
mod wasm;

pub use bonus::{adjusted_delta, select_recipients, BonusVariant};
pub use calculator::{compute_scores, PlayerRoundRecord, PlayerScore, RoundResult, ScoreReport};
pub use config::GameConfig;
pub use document::{GameDocument, StoredPlayer, StoredRound};
pub use error::{ScoringError, MAX_DISPLAY_DECIMALS};
pub use history::{chart_points, project_history, ChartPoint, PlayerSeries, ScoreHistory};
pub use ledger::{
    parse_player_names, round_name, Game, Player, Round, DEFAULT_BASE_SCORE, DEFAULT_PLACEMENT,
    DEFAULT_STAKE,
};
pub use multiplier::{multiplier_for, MultiplierTable};
pub use standings::{round_to, standings, StandingCell, StandingRow, BONUS_MARKER};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_from_setup_text() {
        let mut game = Game::setup("Anna\nBernd\nCarla", "3, 2, 1", DEFAULT_BASE_SCORE).unwrap();
        let config = GameConfig::rubber_band();

        let idx = game.add_round();
        let round = game.round_mut(idx).unwrap();
        round.set_stake("Anna", 2.0);
        round.set_placement("Anna", 1);
        round.set_stake("Bernd", 1.0);
        round.set_placement("Bernd", 4);
        round.set_stake("Carla", 3.0);
        round.set_placement("Carla", 2);

        let idx = game.add_round();
        let round = game.round_mut(idx).unwrap();
        round.set_stake("Bernd", 2.0);
        round.set_placement("Bernd", 2);

        let report = game.scores(config.bonus);
        // Bernd got nothing in round 1 and plays round 2 on a doubled multiplier
        assert_eq!(report.rounds[1].bonus_recipients, vec!["Bernd".to_string()]);
        assert_eq!(report.total_of("Bernd"), Some(28.0));

        let rows = standings(&report, config.display_decimals);
        assert_eq!(rows[0].player, "Bernd");
        assert_eq!(rows[0].cells[0].label, "E: 2 | P: 2 | +8.0★");
    }
}
