//! Route definitions for the marketplace API
//!
//! One generic CRUD router is mounted per resource, plus the chat proxy
//! endpoints and a root health string. CORS is wide open, matching the
//! original deployment where the SPA is served from a separate origin.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::chat::{deepseek_chat, gemini_chat, openrouter_chat};
use crate::database::AppState;
use crate::handler::{create, list, list_viewings, remove, root, update};
use crate::model::{Accommodation, Professional, Resource, Viewing};

/// CRUD routes shared by every resource:
///
/// - `GET /` - full collection
/// - `POST /` - create
/// - `PUT /{id}` - full-document update
/// - `DELETE /{id}` - delete
fn resource_router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/{id}", put(update::<R>).delete(remove::<R>))
}

/// Viewing routes: same CRUD contract, but the list populates the
/// referenced accommodation.
fn viewing_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_viewings).post(create::<Viewing>))
        .route("/{id}", put(update::<Viewing>).delete(remove::<Viewing>))
}

/// Creates the application router with all routes configured.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/accommodation", resource_router::<Accommodation>())
        .nest("/professional", resource_router::<Professional>())
        .nest("/viewing", viewing_router())
        .route("/deepseek/chat", post(deepseek_chat))
        .route("/gemini/chat", post(gemini_chat))
        .route("/openrouter/chat", post(openrouter_chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
