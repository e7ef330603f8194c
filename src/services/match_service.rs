use crate::{
    dto::{matches::MatchSummary, validation::validate_identity},
    error::ServiceError,
    state::{SharedState, registry::MatchNotFound},
};

/// Summaries of every live match announced in `chat`, oldest first.
pub async fn list_chat_matches(
    state: &SharedState,
    chat: &str,
) -> Result<Vec<MatchSummary>, ServiceError> {
    validate_identity(chat).map_err(|err| {
        ServiceError::InvalidInput(format!("invalid chat identifier: {err}"))
    })?;

    let rosters = state.registry().list_by_chat(chat).await;
    Ok(rosters.iter().map(MatchSummary::from).collect())
}

/// Summary of a single live match.
pub async fn get_match(state: &SharedState, id: &str) -> Result<MatchSummary, ServiceError> {
    let roster = state
        .registry()
        .get(id)
        .await
        .ok_or_else(|| MatchNotFound(id.to_owned()))?;
    Ok(MatchSummary::from(&roster))
}
