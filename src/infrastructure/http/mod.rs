//! HTTP REST API routes

mod config_routes;
mod deck_routes;
mod scenario_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/config", get(config_routes::get_config))
        // Scenario routes
        .route("/api/scenario", get(scenario_routes::get_scenario))
        .route("/api/scenario/initiative", get(scenario_routes::get_initiative))
        .route("/api/scenario/level", put(scenario_routes::set_global_level))
        .route("/api/scenario/round", post(scenario_routes::new_round))
        .route("/api/scenario/save", post(scenario_routes::save_scenario))
        .route("/api/scenario/load", post(scenario_routes::load_scenario))
        .route("/api/scenario/reset", post(scenario_routes::reset_scenario))
        // Player routes
        .route("/api/scenario/players", post(scenario_routes::add_player))
        .route(
            "/api/scenario/players/{name}",
            delete(scenario_routes::remove_player),
        )
        .route(
            "/api/scenario/players/{name}/initiative",
            put(scenario_routes::set_player_initiative),
        )
        // Monster routes
        .route("/api/scenario/monsters", post(scenario_routes::add_monster))
        .route(
            "/api/scenario/monsters/{name}",
            get(scenario_routes::get_monster),
        )
        .route(
            "/api/scenario/monsters/{name}",
            delete(scenario_routes::remove_monster),
        )
        .route(
            "/api/scenario/monsters/{name}/initiative",
            put(scenario_routes::set_monster_initiative),
        )
        .route(
            "/api/scenario/monsters/{name}/entities/{id}",
            delete(scenario_routes::remove_entity),
        )
        .route(
            "/api/scenario/monsters/{name}/entities/{id}/health",
            post(scenario_routes::adjust_entity_health),
        )
        .route(
            "/api/scenario/monsters/{name}/entities/{id}/shield",
            put(scenario_routes::set_entity_shield),
        )
        // Monster deck routes
        .route("/api/decks", get(deck_routes::list_decks))
        .route("/api/decks", post(deck_routes::create_deck))
        .route("/api/decks/{id}", get(deck_routes::get_deck))
        .route("/api/decks/{id}", delete(deck_routes::delete_deck))
        .route("/api/decks/{id}/cards", post(deck_routes::insert_card))
        .route("/api/decks/{id}/flip", post(deck_routes::flip_deck))
        .route("/api/decks/{id}/shuffle", post(deck_routes::shuffle_deck))
        .route("/api/decks/{id}/new-round", post(deck_routes::deck_new_round))
        // Attack modifier deck routes
        .route("/api/modifiers", get(deck_routes::get_modifiers))
        .route("/api/modifiers/draw", post(deck_routes::draw_modifier))
        .route("/api/modifiers/draw-two", post(deck_routes::draw_two_modifiers))
        .route("/api/modifiers/curse", post(deck_routes::add_curse))
        .route("/api/modifiers/bless", post(deck_routes::add_bless))
        .route("/api/modifiers/shuffle", post(deck_routes::shuffle_modifiers))
        .route("/api/modifiers/reset", post(deck_routes::reset_modifiers))
}
