/// WebSocket session handling for chat bridges.
pub mod bridge_service;
/// Dispatch of relayed chat messages to match operations.
pub mod chat_service;
/// Chat command parsing.
pub mod command;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read-only match queries for the HTTP API.
pub mod match_service;
/// Reply text rendering.
pub mod presenter;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
