use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the padel bot.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::messages::relay_message,
        crate::routes::matches::list_chat_matches,
        crate::routes::matches::get_match,
        crate::routes::sse::match_stream,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::chat::InboundChatMessage,
            crate::dto::chat::ChatReply,
            crate::dto::chat::BridgeInboundMessage,
            crate::dto::chat::BridgeOutboundMessage,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::MatchStatusDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "chat", description = "Chat bridge endpoints (HTTP and WebSocket)"),
        (name = "matches", description = "Read-only match queries"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
/// OpenAPI description of the HTTP surface.
pub struct ApiDoc;
