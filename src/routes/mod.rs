use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI document.
pub mod docs;
/// Liveness probe.
pub mod health;
/// Read-only match queries.
pub mod matches;
/// Request/response chat relay.
pub mod messages;
/// Match event stream.
pub mod sse;
/// Chat bridge WebSocket.
pub mod websocket;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(messages::router())
        .merge(matches::router())
        .merge(sse::router())
        .merge(websocket::router());

    api_router.merge(docs::router()).with_state(state)
}
