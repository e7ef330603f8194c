/// Concurrent map of live matches.
pub mod registry;
/// A single match and its seat rules.
pub mod roster;
mod sse;

use std::sync::Arc;

use crate::{config::AppConfig, services::presenter::Presenter};

pub use self::sse::SseHub;
use self::registry::MatchRegistry;

/// Reference-counted handle passed to every handler.
pub type SharedState = Arc<AppState>;
/// Buffered events per SSE subscriber before it starts lagging.
const MATCH_EVENTS_CAPACITY: usize = 64;

/// Central application state: the match registry plus everything needed to
/// answer chat commands.
pub struct AppState {
    config: AppConfig,
    registry: MatchRegistry,
    presenter: Presenter,
    match_events: SseHub,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            registry: MatchRegistry::new(config.max_players(), config.match_id_digits()),
            presenter: Presenter::new(config.command_prefix()),
            match_events: SseHub::new(MATCH_EVENTS_CAPACITY),
            config,
        })
    }

    /// Immutable configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry owning every live match.
    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    /// Renderer for chat replies.
    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Broadcast hub used for the match events SSE stream.
    pub fn match_events(&self) -> &SseHub {
        &self.match_events
    }
}
