//! Stored game document
//!
//! Mirrors the shape games are kept in by the document store (German field
//! names included). Derived fields such as totals, per-round winnings and
//! cached bonus recipients may be present in stored data; they are accepted
//! and never read back into a calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use crate::calculator::ScoreReport;
use crate::error::ScoringError;
use crate::ledger::{Game, Player, Round};
use crate::multiplier::MultiplierTable;

/// The store may hand back whole numbers as floats (`1.0`).
fn to_placement(value: f64) -> Result<u32, String> {
    if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(format!("invalid placement {}, expected a whole number", value))
    }
}

fn placement_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error> {
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| to_placement(value).map(|p| (name, p)))
        .collect::<Result<_, _>>()
        .map_err(serde::de::Error::custom)
}

fn cached_placements<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error> {
    let raw = Option::<Vec<f64>>::deserialize(deserializer)?;
    raw.map(|values| values.into_iter().map(to_placement).collect::<Result<_, _>>())
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredPlayer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punkte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub einsaetze: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "cached_placements")]
    pub plaetze: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gewinne: Option<Vec<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRound {
    pub name: String,
    #[serde(default)]
    pub einsaetze: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "placement_map")]
    pub plaetze: BTreeMap<String, u32>,
    /// Cached recipients; older games stored a single name here, newer ones a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_empfaenger: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDocument {
    #[serde(default)]
    pub spieler: Vec<StoredPlayer>,
    #[serde(default)]
    pub multiplikatoren: Vec<f64>,
    #[serde(default)]
    pub runden: Vec<StoredRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zeitstempel: Option<serde_json::Value>,
}

impl GameDocument {
    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ScoringError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Calculator input for this document. Stored totals are ignored and
    /// every player starts from `base_score`.
    pub fn into_game(self, base_score: f64) -> Game {
        let players = self
            .spieler
            .into_iter()
            .map(|p| Player::with_base_score(p.name, base_score))
            .collect();

        let rounds = self
            .runden
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                if r.bonus_empfaenger.is_some() {
                    tracing::debug!(round = i, "ignoring cached bonus recipients");
                }
                Round {
                    name: r.name,
                    stakes: r.einsaetze,
                    placements: r.plaetze,
                }
            })
            .collect();

        Game {
            players,
            multipliers: MultiplierTable::new(self.multiplikatoren),
            rounds,
        }
    }

    /// Document for `game`. With a report, the derived per-player arrays and
    /// each round's bonus recipients are written alongside as a cache.
    pub fn from_game(game: &Game, report: Option<&ScoreReport>) -> Self {
        let spieler = game
            .players
            .iter()
            .map(|player| {
                let mut stored = StoredPlayer {
                    name: player.name.clone(),
                    punkte: None,
                    einsaetze: None,
                    plaetze: None,
                    gewinne: None,
                };
                if let Some(report) = report {
                    let records: Vec<_> = report
                        .rounds
                        .iter()
                        .filter_map(|r| r.record_for(&player.name))
                        .collect();
                    stored.punkte = report.total_of(&player.name);
                    stored.einsaetze = Some(records.iter().map(|r| r.stake).collect());
                    stored.plaetze = Some(records.iter().map(|r| r.placement).collect());
                    stored.gewinne = Some(records.iter().map(|r| r.delta).collect());
                }
                stored
            })
            .collect();

        let runden = game
            .rounds
            .iter()
            .enumerate()
            .map(|(i, round)| StoredRound {
                name: round.name.clone(),
                einsaetze: round.stakes.clone(),
                plaetze: round.placements.clone(),
                bonus_empfaenger: report
                    .and_then(|r| r.rounds.get(i))
                    .map(|result| serde_json::Value::from(result.bonus_recipients.clone())),
            })
            .collect();

        Self {
            spieler,
            multiplikatoren: game.multipliers.values().to_vec(),
            runden,
            zeitstempel: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusVariant;

    const STORED: &str = r#"{
        "spieler": [
            {"name": "A", "punkte": 999, "einsaetze": [2], "plaetze": [1], "gewinne": [500]},
            {"name": "B", "punkte": 21}
        ],
        "multiplikatoren": [3.0, 1.0],
        "runden": [
            {"name": "Runde 1", "einsaetze": {"A": 2, "B": 1}, "plaetze": {"A": 1, "B": 2}, "bonus_empfaenger": []},
            {"name": "Runde 2", "einsaetze": {"A": 1, "B": 3}, "plaetze": {"A": 2, "B": 1}, "bonus_empfaenger": "A"}
        ],
        "zeitstempel": "2025-05-29T12:00:00Z"
    }"#;

    #[test]
    fn test_parse_stored_document() {
        let doc = GameDocument::from_json(STORED).unwrap();
        assert_eq!(doc.spieler.len(), 2);
        assert_eq!(doc.multiplikatoren, vec![3.0, 1.0]);
        assert_eq!(doc.runden[1].plaetze.get("B"), Some(&1));
        assert!(doc.zeitstempel.is_some());
    }

    #[test]
    fn test_cached_fields_are_ignored() {
        let game = GameDocument::from_json(STORED).unwrap().into_game(20.0);
        let report = game.scores(BonusVariant::DoubleLastPlace);

        // The cache claims A was the recipient; recomputation says B
        assert_eq!(report.rounds[1].bonus_recipients, vec!["B".to_string()]);
        assert_eq!(report.total_of("A"), Some(27.0));
        assert_eq!(report.total_of("B"), Some(39.0));
    }

    #[test]
    fn test_minimal_document() {
        let game = GameDocument::from_json(r#"{"spieler": [{"name": "Solo"}]}"#)
            .unwrap()
            .into_game(20.0);
        assert_eq!(game.players, vec![Player::new("Solo")]);
        assert!(game.rounds.is_empty());
        assert!(game.multipliers.is_empty());
    }

    #[test]
    fn test_float_placements_load() {
        let doc = GameDocument::from_json(r#"{
            "spieler": [{"name": "A", "plaetze": [2.0]}, {"name": "B"}],
            "multiplikatoren": [3, 1],
            "runden": [{"name": "Runde 1", "einsaetze": {"A": 2, "B": 1}, "plaetze": {"A": 1.0, "B": 2.0}}]
        }"#)
        .unwrap();
        assert_eq!(doc.runden[0].plaetze.get("A"), Some(&1));
        assert_eq!(doc.spieler[0].plaetze, Some(vec![2]));

        let report = doc.into_game(20.0).scores(BonusVariant::None);
        assert_eq!(report.total_of("A"), Some(26.0));
        assert_eq!(report.total_of("B"), Some(21.0));
    }

    #[test]
    fn test_fractional_placement_rejected() {
        for bad in ["1.5", "-1"] {
            let json = format!(r#"{{"runden": [{{"name": "R", "plaetze": {{"A": {}}}}}]}}"#, bad);
            assert!(
                matches!(GameDocument::from_json(&json), Err(ScoringError::Json(_))),
                "placement {} should not load",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            GameDocument::from_json(r#"{"runden": [{"einsaetze": {}}]}"#),
            Err(ScoringError::Json(_))
        ));
    }

    #[test]
    fn test_from_game_writes_cache() {
        let game = GameDocument::from_json(STORED).unwrap().into_game(20.0);
        let report = game.scores(BonusVariant::ShieldAllTiedLast);
        let doc = GameDocument::from_game(&game, Some(&report));

        assert_eq!(doc.spieler[0].punkte, Some(27.0));
        assert_eq!(doc.spieler[1].gewinne, Some(vec![1.0, 9.0]));
        assert_eq!(doc.runden[0].bonus_empfaenger, Some(serde_json::json!([])));
        assert_eq!(doc.runden[1].bonus_empfaenger, Some(serde_json::json!(["B"])));

        // Reading it back recomputes to the same report
        let reparsed = GameDocument::from_json(&doc.to_json().unwrap()).unwrap().into_game(20.0);
        assert_eq!(reparsed.scores(BonusVariant::ShieldAllTiedLast), report);
    }

    #[test]
    fn test_from_game_without_report() {
        let mut game = Game::setup("A\nB", "3,1", 20.0).unwrap();
        game.add_round();
        let doc = GameDocument::from_game(&game, None);

        assert!(doc.spieler.iter().all(|p| p.punkte.is_none() && p.gewinne.is_none()));
        assert!(doc.runden[0].bonus_empfaenger.is_none());
        let json = doc.to_json().unwrap();
        assert!(!json.contains("bonus_empfaenger"));
        assert!(!json.contains("zeitstempel"));
    }
}
