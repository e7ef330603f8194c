use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::chat::{ChatReply, InboundChatMessage},
    error::AppError,
    services::chat_service,
    state::SharedState,
};

/// Routes used by request/response chat bridges.
pub fn router() -> Router<SharedState> {
    Router::new().route("/messages", post(relay_message))
}

/// Feed one chat message to the bot and return the reply to post, if any.
#[utoipa::path(
    post,
    path = "/messages",
    tag = "chat",
    request_body = InboundChatMessage,
    responses(
        (status = 200, description = "Message processed; `reply` is absent when the bot stays silent", body = ChatReply),
        (status = 400, description = "Invalid message payload")
    )
)]
pub async fn relay_message(
    State(state): State<SharedState>,
    Json(payload): Json<InboundChatMessage>,
) -> Result<Json<ChatReply>, AppError> {
    payload.validate()?;
    let reply = chat_service::handle_message(&state, &payload).await;
    Ok(Json(ChatReply { reply }))
}
