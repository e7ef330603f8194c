use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness together with the number of tracked matches.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.registry().len())
}
