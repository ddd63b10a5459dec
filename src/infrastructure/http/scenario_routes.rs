//! Scenario API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::outbound::LookupError;
use crate::application::services::{RoundDraws, ScenarioError};
use crate::domain::entities::{CharacterInitiative, Entity, InstanceSpec, Monster, ScenarioState};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMonsterRequest {
    pub monster: Monster,
    #[serde(default)]
    pub new_monsters: Vec<InstanceSpec>,
}

#[derive(Debug, Deserialize)]
pub struct InitiativeRequest {
    pub initiative: u32,
}

#[derive(Debug, Deserialize)]
pub struct HealthRequest {
    /// Negative for damage, positive for healing
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct ShieldRequest {
    pub shield: u32,
}

#[derive(Debug, Deserialize)]
pub struct LevelRequest {
    pub level: u32,
}

#[derive(Debug, Deserialize)]
pub struct InitiativeQuery {
    #[serde(default)]
    pub sorted: bool,
}

#[derive(Debug, Serialize)]
pub struct NewRoundResponse {
    pub round: u32,
    pub draws: RoundDraws,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub loaded: bool,
    pub state: ScenarioState,
}

/// Map a scenario error to an HTTP status and message
fn error_response(error: ScenarioError) -> (StatusCode, String) {
    let status = match &error {
        ScenarioError::Lookup(LookupError::NotFound(_))
        | ScenarioError::Lookup(LookupError::UnknownSpecies(_)) => StatusCode::NOT_FOUND,
        ScenarioError::Lookup(LookupError::InvalidStats { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        ScenarioError::Lookup(LookupError::Transient(_)) => StatusCode::BAD_GATEWAY,
        ScenarioError::Lookup(LookupError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        ScenarioError::InvalidLevel(_) => StatusCode::BAD_REQUEST,
        ScenarioError::Deserialization(_) => StatusCode::CONFLICT,
        ScenarioError::Store(_) | ScenarioError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, error.to_string())
}

fn not_found(what: String) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Not found: {}", what))
}

/// Get the whole scenario
pub async fn get_scenario(State(state): State<Arc<AppState>>) -> Json<ScenarioState> {
    Json(state.scenario_service.state().await)
}

/// Get the initiative projection, optionally in acting order
pub async fn get_initiative(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InitiativeQuery>,
) -> Json<Vec<CharacterInitiative>> {
    let service = &state.scenario_service;
    if query.sorted {
        Json(service.turn_order().await)
    } else {
        Json(service.initiatives().await)
    }
}

/// Add a player looked up by name
pub async fn add_player(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddPlayerRequest>,
) -> Result<(StatusCode, Json<ScenarioState>), (StatusCode, String)> {
    let added = state
        .scenario_service
        .add_player(&req.name)
        .await
        .map_err(error_response)?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(state.scenario_service.state().await)))
}

/// Remove a player
pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> StatusCode {
    state.scenario_service.remove_player(&name).await;
    StatusCode::NO_CONTENT
}

pub async fn set_player_initiative(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<InitiativeRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state
        .scenario_service
        .set_player_initiative(&name, req.initiative)
        .await
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("player {}", name)))
    }
}

/// Spawn entities for a monster group
pub async fn add_monster(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMonsterRequest>,
) -> Result<Json<Monster>, (StatusCode, String)> {
    state
        .scenario_service
        .add_monster(req.monster, &req.new_monsters)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Get a monster group from the scenario, falling back to the catalog
pub async fn get_monster(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Monster>, (StatusCode, String)> {
    state
        .scenario_service
        .get_monster(&name)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn remove_monster(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> StatusCode {
    state.scenario_service.remove_monster(&name).await;
    StatusCode::NO_CONTENT
}

pub async fn set_monster_initiative(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<InitiativeRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state
        .scenario_service
        .set_monster_initiative(&name, req.initiative)
        .await
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("monster {}", name)))
    }
}

/// Damage or heal one entity
pub async fn adjust_entity_health(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, u32)>,
    Json(req): Json<HealthRequest>,
) -> Result<Json<Entity>, (StatusCode, String)> {
    state
        .scenario_service
        .adjust_entity_health(&name, id, req.delta)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("{} #{}", name, id)))
}

pub async fn set_entity_shield(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, u32)>,
    Json(req): Json<ShieldRequest>,
) -> Result<Json<Entity>, (StatusCode, String)> {
    state
        .scenario_service
        .set_entity_shield(&name, id, req.shield)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("{} #{}", name, id)))
}

pub async fn remove_entity(
    State(state): State<Arc<AppState>>,
    Path((name, id)): Path<(String, u32)>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.scenario_service.remove_entity(&name, id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("{} #{}", name, id)))
    }
}

pub async fn set_global_level(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LevelRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .scenario_service
        .set_global_level(req.level)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Advance the round: bump the counter, reveal monster cards and carry
/// each revealed initiative onto its monster group
pub async fn new_round(State(state): State<Arc<AppState>>) -> Json<NewRoundResponse> {
    let round = state.scenario_service.update_round().await;
    let draws = state.deck_service.new_round_all().await;
    for drawn in &draws.monster_cards {
        state
            .scenario_service
            .set_monster_initiative(&drawn.monster_name, drawn.card.initiative)
            .await;
    }
    Json(NewRoundResponse { round, draws })
}

pub async fn save_scenario(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .scenario_service
        .save_state()
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn load_scenario(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoadResponse>, (StatusCode, String)> {
    let loaded = state
        .scenario_service
        .load_state()
        .await
        .map_err(error_response)?;
    Ok(Json(LoadResponse {
        loaded,
        state: state.scenario_service.state().await,
    }))
}

pub async fn reset_scenario(State(state): State<Arc<AppState>>) -> Json<ScenarioState> {
    state.scenario_service.reset().await;
    Json(state.scenario_service.state().await)
}
