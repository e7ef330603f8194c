use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::matches::MatchSummary, error::AppError, services::match_service, state::SharedState,
};

/// Read-only views over the match registry.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/chats/{chat}/matches", get(list_chat_matches))
        .route("/matches/{id}", get(get_match))
}

/// List the live matches announced in a chat, oldest first.
#[utoipa::path(
    get,
    path = "/chats/{chat}/matches",
    tag = "matches",
    params(("chat" = String, Path, description = "Identifier of the chat")),
    responses((status = 200, description = "Matches of the chat", body = [MatchSummary]))
)]
pub async fn list_chat_matches(
    State(state): State<SharedState>,
    Path(chat): Path<String>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::list_chat_matches(&state, &chat).await?))
}

/// Retrieve a live match by its identifier.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match", body = MatchSummary),
        (status = 404, description = "No live match with this identifier")
    )
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MatchSummary>, AppError> {
    Ok(Json(match_service::get_match(&state, &id).await?))
}
