use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use rand::Rng;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::state::roster::{
    DEFAULT_CAPACITY, JoinOutcome, LeaveOutcome, MAX_CAPACITY, MatchId, MatchRoster,
    MatchStatus,
};

/// Width of generated identifiers unless configured otherwise.
pub const DEFAULT_MATCH_ID_DIGITS: usize = 4;
/// Collisions tolerated at one width before identifiers grow by a digit.
const MAX_ATTEMPTS_PER_WIDTH: usize = 32;
/// Widest identifier that still fits in a `u64` range.
const MAX_MATCH_ID_DIGITS: usize = 18;

/// Returned when an identifier does not resolve to a live match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("match `{0}` not found")]
pub struct MatchNotFound(pub MatchId);

/// Reasons a cancellation request can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelError {
    /// No live match carries this identifier.
    #[error("match `{0}` not found")]
    NotFound(MatchId),
    /// The requester did not create the match.
    #[error("match `{id}` can only be cancelled by `{creator}`")]
    NotAuthorized {
        /// Identifier of the match.
        id: MatchId,
        /// Identity allowed to cancel it.
        creator: String,
    },
}

impl From<MatchNotFound> for CancelError {
    fn from(err: MatchNotFound) -> Self {
        CancelError::NotFound(err.0)
    }
}

/// Lookup key for a match, optionally restricted to the chat it belongs to.
///
/// A match announced in another chat resolves as not found.
#[derive(Debug, Clone, Copy)]
pub struct MatchRef<'a> {
    id: &'a str,
    chat: Option<&'a str>,
}

impl<'a> MatchRef<'a> {
    /// Reference a match only if it belongs to `chat`.
    pub fn in_chat(id: &'a str, chat: &'a str) -> Self {
        Self {
            id,
            chat: Some(chat),
        }
    }

    fn accepts(&self, roster: &MatchRoster) -> bool {
        roster.status() != MatchStatus::Cancelled
            && self.chat.is_none_or(|chat| chat == roster.chat())
    }

    fn not_found(&self) -> MatchNotFound {
        MatchNotFound(self.id.to_owned())
    }
}

impl<'a> From<&'a str> for MatchRef<'a> {
    fn from(id: &'a str) -> Self {
        Self { id, chat: None }
    }
}

struct RegistryEntry {
    sequence: u64,
    chat: String,
    roster: Arc<Mutex<MatchRoster>>,
}

/// In-memory registry owning every live match.
///
/// Each roster sits behind its own lock so that mutations on one match never
/// wait on another. Callers only ever receive snapshots.
pub struct MatchRegistry {
    entries: DashMap<MatchId, RegistryEntry>,
    sequence: AtomicU64,
    capacity: usize,
    id_digits: usize,
}

impl Default for MatchRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_MATCH_ID_DIGITS)
    }
}

impl MatchRegistry {
    /// Create an empty registry whose matches offer `capacity` seats and get
    /// `id_digits`-long identifiers.
    pub fn new(capacity: usize, id_digits: usize) -> Self {
        Self {
            entries: DashMap::new(),
            sequence: AtomicU64::new(0),
            capacity: capacity.clamp(1, MAX_CAPACITY),
            id_digits: id_digits.clamp(1, MAX_MATCH_ID_DIGITS),
        }
    }

    /// Number of live matches across every chat.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no match is live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a new match with `creator` already seated and return its snapshot.
    pub fn create(&self, creator: &str, date: &str, time: &str, chat: &str) -> MatchRoster {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let mut width = self.id_digits;
        let mut attempts = 0;

        loop {
            match self.entries.entry(generate_match_id(width)) {
                Entry::Occupied(taken) => {
                    debug!(match_id = %taken.key(), "generated match id already in use");
                    attempts += 1;
                    if attempts >= MAX_ATTEMPTS_PER_WIDTH && width < MAX_MATCH_ID_DIGITS {
                        width += 1;
                        attempts = 0;
                    }
                }
                Entry::Vacant(slot) => {
                    let roster = MatchRoster::new(
                        slot.key().clone(),
                        creator.to_owned(),
                        date.to_owned(),
                        time.to_owned(),
                        chat.to_owned(),
                        self.capacity,
                    );
                    slot.insert(RegistryEntry {
                        sequence,
                        chat: chat.to_owned(),
                        roster: Arc::new(Mutex::new(roster.clone())),
                    });
                    return roster;
                }
            }
        }
    }

    /// Snapshot of a live match.
    pub async fn get<'a>(&self, key: impl Into<MatchRef<'a>>) -> Option<MatchRoster> {
        let key = key.into();
        let handle = self.handle(key.id)?;
        let roster = handle.lock().await;
        key.accepts(&roster).then(|| roster.clone())
    }

    /// Snapshots of every live match of `chat`, oldest first.
    pub async fn list_by_chat(&self, chat: &str) -> Vec<MatchRoster> {
        let mut handles: Vec<(u64, Arc<Mutex<MatchRoster>>)> = self
            .entries
            .iter()
            .filter(|entry| entry.chat == chat)
            .map(|entry| (entry.sequence, Arc::clone(&entry.roster)))
            .collect();
        handles.sort_by_key(|(sequence, _)| *sequence);

        let mut rosters = Vec::with_capacity(handles.len());
        for (_, handle) in handles {
            let roster = handle.lock().await;
            if roster.status() != MatchStatus::Cancelled {
                rosters.push(roster.clone());
            }
        }
        rosters
    }

    /// Apply [`MatchRoster::join`] under the match lock.
    pub async fn join<'a>(
        &self,
        key: impl Into<MatchRef<'a>>,
        user: &str,
    ) -> Result<(JoinOutcome, MatchRoster), MatchNotFound> {
        self.with_roster_mut(key.into(), |roster| roster.join(user))
            .await
    }

    /// Apply [`MatchRoster::leave`] under the match lock.
    pub async fn leave<'a>(
        &self,
        key: impl Into<MatchRef<'a>>,
        user: &str,
    ) -> Result<(LeaveOutcome, MatchRoster), MatchNotFound> {
        self.with_roster_mut(key.into(), |roster| roster.leave(user))
            .await
    }

    /// Remove a match on behalf of its creator, returning its final snapshot.
    pub async fn cancel<'a>(
        &self,
        key: impl Into<MatchRef<'a>>,
        requester: &str,
    ) -> Result<MatchRoster, CancelError> {
        let key = key.into();
        let handle = self.handle(key.id).ok_or_else(|| key.not_found())?;
        let mut roster = handle.lock().await;

        if !key.accepts(&roster) {
            return Err(key.not_found().into());
        }

        if roster.creator() != requester {
            return Err(CancelError::NotAuthorized {
                id: roster.id().to_owned(),
                creator: roster.creator().to_owned(),
            });
        }

        roster.mark_cancelled();
        self.entries
            .remove_if(key.id, |_, entry| Arc::ptr_eq(&entry.roster, &handle));
        Ok(roster.clone())
    }

    async fn with_roster_mut<T>(
        &self,
        key: MatchRef<'_>,
        apply: impl FnOnce(&mut MatchRoster) -> T,
    ) -> Result<(T, MatchRoster), MatchNotFound> {
        let handle = self.handle(key.id).ok_or_else(|| key.not_found())?;
        let mut roster = handle.lock().await;

        if !key.accepts(&roster) {
            return Err(key.not_found());
        }

        let outcome = apply(&mut *roster);
        Ok((outcome, roster.clone()))
    }

    // The map guard is released before the caller awaits the roster lock.
    fn handle(&self, id: &str) -> Option<Arc<Mutex<MatchRoster>>> {
        self.entries.get(id).map(|entry| Arc::clone(&entry.roster))
    }
}

/// Random zero-padded numeric identifier of exactly `width` digits.
fn generate_match_id(width: usize) -> MatchId {
    let upper = 10u64.pow(width as u32);
    let value = rand::rng().random_range(0..upper);
    format!("{value:0width$}")
}
