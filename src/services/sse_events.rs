use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{matches::MatchSummary, sse::ServerEvent},
    state::{SharedState, roster::MatchRoster},
};

const EVENT_MATCH_CREATED: &str = "match.created";
const EVENT_MATCH_UPDATED: &str = "match.updated";
const EVENT_MATCH_CANCELLED: &str = "match.cancelled";

/// Broadcast a freshly announced match.
pub fn broadcast_match_created(state: &SharedState, roster: &MatchRoster) {
    send_match_event(state, EVENT_MATCH_CREATED, &MatchSummary::from(roster));
}

/// Broadcast a roster change (join, leave, promotion).
pub fn broadcast_match_updated(state: &SharedState, roster: &MatchRoster) {
    send_match_event(state, EVENT_MATCH_UPDATED, &MatchSummary::from(roster));
}

/// Broadcast the final snapshot of a cancelled match.
pub fn broadcast_match_cancelled(state: &SharedState, roster: &MatchRoster) {
    send_match_event(state, EVENT_MATCH_CANCELLED, &MatchSummary::from(roster));
}

fn send_match_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.match_events().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize match SSE payload"),
    }
}
