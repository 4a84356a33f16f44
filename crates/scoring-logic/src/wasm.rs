//! WASM bindings for the live score display

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{
    chart_points, standings, BonusVariant, GameConfig, GameDocument, MultiplierTable,
    ScoreReport, parse_player_names,
};

fn to_js_error(context: &str, err: impl core::fmt::Display) -> JsError {
    JsError::new(&format!("{}: {}", context, err))
}

/// Parse the config JSON, an empty string meaning defaults.
fn parse_config(config_json: &str) -> Result<GameConfig, JsError> {
    GameConfig::from_json_or_default(config_json).map_err(|e| to_js_error("Invalid config", e))
}

fn recompute(document_json: &str, config: &GameConfig) -> Result<ScoreReport, JsError> {
    let document = GameDocument::from_json(document_json)
        .map_err(|e| to_js_error("Invalid game document", e))?;
    Ok(document.into_game(config.base_score).scores(config.bonus))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| to_js_error("Serialization error", e))
}

/// Recompute a stored game
///
/// # Arguments
/// * `document_json` - Game document as kept in the store
/// * `config_json` - JSON serialized GameConfig, or "" for defaults
///
/// # Returns
/// ScoreReport with final totals, per-round results and history
#[wasm_bindgen]
pub fn compute_game(document_json: &str, config_json: &str) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let report = recompute(document_json, &config)?;
    to_js(&report)
}

/// Leaderboard rows, highest total first, rounded for display
#[wasm_bindgen]
pub fn get_standings(document_json: &str, config_json: &str) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let report = recompute(document_json, &config)?;
    to_js(&standings(&report, config.display_decimals))
}

/// Chart points for the score curve
///
/// With `include_open_round` false the latest round is left off the chart.
#[wasm_bindgen]
pub fn get_score_history(
    document_json: &str,
    config_json: &str,
    include_open_round: bool,
) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let report = recompute(document_json, &config)?;
    to_js(&chart_points(&report.history, &report.rounds, include_open_round))
}

#[derive(serde::Serialize)]
struct SetupResult {
    players: Vec<String>,
    multipliers: Vec<f64>,
}

/// Validate the setup form: player names one per line, multipliers comma separated
#[wasm_bindgen]
pub fn parse_setup(names_text: &str, multipliers_text: &str) -> Result<JsValue, JsError> {
    let players = parse_player_names(names_text, GameConfig::default().base_score)
        .map_err(|e| to_js_error("Invalid players", e))?;
    let multipliers = MultiplierTable::parse(multipliers_text)
        .map_err(|e| to_js_error("Invalid multipliers", e))?;

    to_js(&SetupResult {
        players: players.into_iter().map(|p| p.name).collect(),
        multipliers: multipliers.values().to_vec(),
    })
}

/// Names of all bonus variants, for the settings dropdown
#[wasm_bindgen]
pub fn get_bonus_variants() -> js_sys::Array {
    BonusVariant::ALL
        .iter()
        .map(|variant| JsValue::from_str(variant.name()))
        .collect()
}

/// Human-readable description of a bonus variant
#[wasm_bindgen]
pub fn get_bonus_description(name: &str) -> Result<String, JsError> {
    let variant: BonusVariant = name.parse().map_err(|e| to_js_error("Invalid bonus", e))?;
    Ok(variant.description().to_string())
}
