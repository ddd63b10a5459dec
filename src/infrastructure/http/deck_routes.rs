//! Deck API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::outbound::LookupError;
use crate::application::services::DeckServiceError;
use crate::domain::entities::{ModifierCard, ModifierDeck, MonsterCard, MonsterDeck};
use crate::domain::value_objects::DeckId;
use crate::infrastructure::state::AppState;

/// Request to put a monster deck into play
///
/// Without `cards`, the species' deck is taken from the catalog at `level`
/// (default: the scenario's global level).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeckRequest {
    pub monster_name: String,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub cards: Option<Vec<MonsterCard>>,
}

#[derive(Debug, Serialize)]
pub struct DeckResponse {
    pub id: String,
    #[serde(flatten)]
    pub deck: MonsterDeck,
}

impl From<(DeckId, MonsterDeck)> for DeckResponse {
    fn from((id, deck): (DeckId, MonsterDeck)) -> Self {
        Self {
            id: id.to_string(),
            deck,
        }
    }
}

fn error_response(error: DeckServiceError) -> (StatusCode, String) {
    let status = match &error {
        DeckServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        DeckServiceError::Deck(_) => StatusCode::CONFLICT,
        DeckServiceError::Lookup(LookupError::NotFound(_))
        | DeckServiceError::Lookup(LookupError::UnknownSpecies(_)) => StatusCode::NOT_FOUND,
        DeckServiceError::Lookup(LookupError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        DeckServiceError::Lookup(_) => StatusCode::BAD_GATEWAY,
    };
    (status, error.to_string())
}

/// List monster decks in play
pub async fn list_decks(State(state): State<Arc<AppState>>) -> Json<Vec<DeckResponse>> {
    let decks = state.deck_service.monster_decks().await;
    Json(decks.into_iter().map(DeckResponse::from).collect())
}

/// Put a monster deck into play
pub async fn create_deck(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<DeckResponse>), (StatusCode, String)> {
    let created = match req.cards {
        Some(cards) => {
            state
                .deck_service
                .create_monster_deck(&req.monster_name, cards)
                .await
        }
        None => {
            let level = match req.level {
                Some(level) => level,
                None => state.scenario_service.state().await.global_level,
            };
            state
                .deck_service
                .create_monster_deck_from_catalog(&req.monster_name, level)
                .await
                .map_err(error_response)?
        }
    };
    Ok((StatusCode::CREATED, Json(DeckResponse::from(created))))
}

pub async fn get_deck(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeckResponse>, (StatusCode, String)> {
    let id = DeckId::from_uuid(id);
    state
        .deck_service
        .monster_deck(id)
        .await
        .map(|deck| Json(DeckResponse::from((id, deck))))
        .ok_or_else(|| error_response(DeckServiceError::NotFound(id)))
}

pub async fn delete_deck(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state
        .deck_service
        .remove_monster_deck(DeckId::from_uuid(id))
        .await
    {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn insert_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(card): Json<MonsterCard>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .deck_service
        .insert_card(DeckId::from_uuid(id), card)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reveal the next card
pub async fn flip_deck(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MonsterCard>, (StatusCode, String)> {
    state
        .deck_service
        .flip(DeckId::from_uuid(id))
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn shuffle_deck(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MonsterCard>, (StatusCode, String)> {
    state
        .deck_service
        .shuffle(DeckId::from_uuid(id))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Reshuffle if owed, then reveal the next card
pub async fn deck_new_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MonsterCard>, (StatusCode, String)> {
    state
        .deck_service
        .new_round(DeckId::from_uuid(id))
        .await
        .map(Json)
        .map_err(error_response)
}

// ============================================================================
// Attack modifier deck
// ============================================================================

pub async fn get_modifiers(State(state): State<Arc<AppState>>) -> Json<ModifierDeck> {
    Json(state.deck_service.modifier_deck().await)
}

pub async fn draw_modifier(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModifierCard>, (StatusCode, String)> {
    state
        .deck_service
        .draw_modifier()
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn draw_two_modifiers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<[ModifierCard; 2]>, (StatusCode, String)> {
    state
        .deck_service
        .draw_two_modifiers()
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn add_curse(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModifierDeck>, (StatusCode, String)> {
    state
        .deck_service
        .add_curse()
        .await
        .map_err(error_response)?;
    Ok(Json(state.deck_service.modifier_deck().await))
}

pub async fn add_bless(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModifierDeck>, (StatusCode, String)> {
    state
        .deck_service
        .add_bless()
        .await
        .map_err(error_response)?;
    Ok(Json(state.deck_service.modifier_deck().await))
}

pub async fn shuffle_modifiers(State(state): State<Arc<AppState>>) -> Json<ModifierDeck> {
    state.deck_service.shuffle_modifiers().await;
    Json(state.deck_service.modifier_deck().await)
}

pub async fn reset_modifiers(State(state): State<Arc<AppState>>) -> Json<ModifierDeck> {
    state.deck_service.reset_modifiers().await;
    Json(state.deck_service.modifier_deck().await)
}
