//! Library crate for padel-bot-back, exposing modules for the binary and integration tests.

pub mod config;
mod dto;
mod error;
/// HTTP, WebSocket and SSE route trees.
pub mod routes;
/// Command handling and transport services.
pub mod services;
/// Shared application state and the match registry.
pub mod state;

pub use dto::chat::InboundChatMessage;
