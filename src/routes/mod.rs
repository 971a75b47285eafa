//! Route gateway: merges every subrouter and attaches the shared state.
//!
//! `main.rs` only calls [`router`]; individual endpoints stay private to
//! their sibling modules.

use axum::{
    response::{IntoResponse, Response},
    Router,
};
use uuid::Uuid;

use crate::{Config, Models};

mod health;
mod predict_aqi;
mod predict_time;
mod reference;

/// Header carrying the per-request id on prediction responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// State shared by every handler.
pub type AppState = (Models, Config);

// ---

pub fn router(models: Models, config: Config) -> Router {
    // ---
    Router::new()
        .merge(predict_aqi::router())
        .merge(predict_time::router())
        .merge(reference::router())
        .merge(health::router())
        .with_state((models, config))
}

/// Attach the request id header to a handler response.
fn with_request_id(request_id: Uuid, response: Response) -> Response {
    // ---
    ([(REQUEST_ID_HEADER, request_id.to_string())], response).into_response()
}
