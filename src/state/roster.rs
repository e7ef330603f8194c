use indexmap::IndexSet;
use time::OffsetDateTime;

/// Identifier players type to reference a match (e.g. `"0427"`).
pub type MatchId = String;

/// Number of seats a match offers unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 4;
/// Largest number of seats a match may offer.
pub const MAX_CAPACITY: usize = 32;

/// Lifecycle status of a match roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// At least one seat is still free.
    Open,
    /// Every seat is taken; newcomers go to the waiting list.
    Full,
    /// The creator cancelled the match. Terminal.
    Cancelled,
}

/// Result of a player asking to join a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The player took a free seat.
    Admitted,
    /// Every seat was taken; the player was queued at the given 1-based position.
    Waitlisted {
        /// Position in the waiting list after insertion.
        position: usize,
    },
    /// The player already holds a seat.
    AlreadyJoined,
    /// The player is already queued on the waiting list.
    AlreadyWaitlisted,
}

impl JoinOutcome {
    /// Whether the roster was mutated by the join.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Admitted | Self::Waitlisted { .. })
    }
}

/// Result of a player asking to leave a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The player left and the head of the waiting list took the seat.
    LeftAndPromoted {
        /// Identity moved from the waiting list into the roster.
        promoted: String,
    },
    /// The player left and nobody was waiting; the match is open again.
    Left,
    /// The player was only on the waiting list and has been removed from it.
    RemovedFromWaitingList,
    /// The player was neither playing nor waiting.
    NotParticipant,
}

impl LeaveOutcome {
    /// Whether the roster was mutated by the leave.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::NotParticipant)
    }
}

/// One organised match with its seats and FIFO waiting list.
#[derive(Debug, Clone)]
pub struct MatchRoster {
    id: MatchId,
    creator: String,
    date: String,
    time: String,
    chat: String,
    capacity: usize,
    participants: IndexSet<String>,
    waiting_list: IndexSet<String>,
    status: MatchStatus,
    revision: u64,
    created_at: OffsetDateTime,
}

impl MatchRoster {
    /// Build a fresh roster with the creator sitting in the first seat.
    ///
    /// `capacity` is clamped to `1..=MAX_CAPACITY` so the creator always fits.
    pub fn new(
        id: MatchId,
        creator: String,
        date: String,
        time: String,
        chat: String,
        capacity: usize,
    ) -> Self {
        let mut participants = IndexSet::new();
        participants.insert(creator.clone());

        let mut roster = Self {
            id,
            creator,
            date,
            time,
            chat,
            capacity: capacity.clamp(1, MAX_CAPACITY),
            participants,
            waiting_list: IndexSet::new(),
            status: MatchStatus::Open,
            revision: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        roster.refresh_status();
        roster
    }

    /// Identifier players type in commands.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Player who announced the match; the only one allowed to cancel it.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// Free-form date as typed by the creator.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Free-form time as typed by the creator.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Chat the match was announced in.
    pub fn chat(&self) -> &str {
        &self.chat
    }

    /// Number of seats.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current lifecycle status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Counter bumped by every mutation, starting at 0 on creation.
    ///
    /// Snapshots of the same match are ordered by their revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Creation instant (UTC).
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Seated players in join order.
    pub fn participants(&self) -> &IndexSet<String> {
        &self.participants
    }

    /// Queued players in arrival order.
    pub fn waiting_list(&self) -> &IndexSet<String> {
        &self.waiting_list
    }

    /// Whether every seat is taken.
    pub fn is_full(&self) -> bool {
        self.status == MatchStatus::Full
    }

    /// Seat `user`, or queue them when every seat is taken.
    pub fn join(&mut self, user: &str) -> JoinOutcome {
        if self.participants.contains(user) {
            return JoinOutcome::AlreadyJoined;
        }

        if self.participants.len() < self.capacity {
            self.participants.insert(user.to_owned());
            self.refresh_status();
            self.revision += 1;
            return JoinOutcome::Admitted;
        }

        if self.waiting_list.contains(user) {
            return JoinOutcome::AlreadyWaitlisted;
        }

        self.waiting_list.insert(user.to_owned());
        self.revision += 1;
        JoinOutcome::Waitlisted {
            position: self.waiting_list.len(),
        }
    }

    /// Remove `user` from the match, promoting the oldest waiting player into
    /// the freed seat.
    pub fn leave(&mut self, user: &str) -> LeaveOutcome {
        let outcome = self.remove(user);
        if outcome.is_success() {
            self.revision += 1;
        }
        outcome
    }

    fn remove(&mut self, user: &str) -> LeaveOutcome {
        if self.participants.shift_remove(user) {
            if let Some(promoted) = self.waiting_list.shift_remove_index(0) {
                self.participants.insert(promoted.clone());
                return LeaveOutcome::LeftAndPromoted { promoted };
            }

            self.refresh_status();
            return LeaveOutcome::Left;
        }

        if self.waiting_list.shift_remove(user) {
            return LeaveOutcome::RemovedFromWaitingList;
        }

        LeaveOutcome::NotParticipant
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.status = MatchStatus::Cancelled;
        self.revision += 1;
    }

    fn refresh_status(&mut self) {
        if self.status == MatchStatus::Cancelled {
            return;
        }

        self.status = if self.participants.len() >= self.capacity {
            MatchStatus::Full
        } else {
            MatchStatus::Open
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(capacity: usize) -> MatchRoster {
        MatchRoster::new(
            "0042".into(),
            "U1".into(),
            "12/08".into(),
            "18h".into(),
            "chat-a".into(),
            capacity,
        )
    }

    fn names(set: &IndexSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn creator_takes_first_seat() {
        let roster = roster(DEFAULT_CAPACITY);
        assert_eq!(names(roster.participants()), ["U1"]);
        assert!(roster.waiting_list().is_empty());
        assert_eq!(roster.status(), MatchStatus::Open);
        assert_eq!(roster.capacity(), 4);
    }

    #[test]
    fn single_seat_match_starts_full() {
        let roster = roster(1);
        assert_eq!(roster.status(), MatchStatus::Full);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let roster = roster(0);
        assert_eq!(roster.capacity(), 1);
        assert!(roster.is_full());
    }

    #[test]
    fn huge_capacity_is_capped() {
        let mut roster = roster(usize::MAX);
        assert_eq!(roster.capacity(), MAX_CAPACITY);
        assert_eq!(roster.join("U2"), JoinOutcome::Admitted);
    }

    #[test]
    fn revision_counts_only_effective_mutations() {
        let mut roster = roster(2);
        assert_eq!(roster.revision(), 0);

        roster.join("U2");
        roster.join("U2");
        assert_eq!(roster.revision(), 1);

        roster.join("U3");
        roster.join("U3");
        assert_eq!(roster.revision(), 2);

        roster.leave("U9");
        assert_eq!(roster.revision(), 2);
        roster.leave("U2");
        assert_eq!(roster.revision(), 3);

        roster.mark_cancelled();
        assert_eq!(roster.revision(), 4);
    }

    #[test]
    fn joins_keep_arrival_order_until_full() {
        let mut roster = roster(DEFAULT_CAPACITY);

        assert_eq!(roster.join("U2"), JoinOutcome::Admitted);
        assert_eq!(roster.join("U3"), JoinOutcome::Admitted);
        assert_eq!(roster.status(), MatchStatus::Open);
        assert_eq!(roster.join("U4"), JoinOutcome::Admitted);

        assert_eq!(names(roster.participants()), ["U1", "U2", "U3", "U4"]);
        assert_eq!(roster.status(), MatchStatus::Full);
    }

    #[test]
    fn joining_twice_changes_nothing() {
        let mut roster = roster(DEFAULT_CAPACITY);
        assert_eq!(roster.join("U2"), JoinOutcome::Admitted);
        assert_eq!(roster.join("U2"), JoinOutcome::AlreadyJoined);
        assert_eq!(roster.join("U1"), JoinOutcome::AlreadyJoined);

        assert_eq!(names(roster.participants()), ["U1", "U2"]);
        assert!(roster.waiting_list().is_empty());
    }

    #[test]
    fn full_roster_overflows_into_waiting_list() {
        let mut roster = roster(2);
        roster.join("U2");

        assert_eq!(roster.join("U3"), JoinOutcome::Waitlisted { position: 1 });
        assert_eq!(roster.join("U4"), JoinOutcome::Waitlisted { position: 2 });
        assert_eq!(roster.join("U3"), JoinOutcome::AlreadyWaitlisted);

        assert_eq!(names(roster.participants()), ["U1", "U2"]);
        assert_eq!(names(roster.waiting_list()), ["U3", "U4"]);
        assert!(!JoinOutcome::AlreadyWaitlisted.is_success());
    }

    #[test]
    fn leaving_full_roster_promotes_head_of_waiting_list() {
        let mut roster = roster(DEFAULT_CAPACITY);
        for user in ["U2", "U3", "U4", "U5", "U6"] {
            roster.join(user);
        }

        let outcome = roster.leave("U2");

        assert_eq!(
            outcome,
            LeaveOutcome::LeftAndPromoted {
                promoted: "U5".into()
            }
        );
        assert_eq!(names(roster.participants()), ["U1", "U3", "U4", "U5"]);
        assert_eq!(names(roster.waiting_list()), ["U6"]);
        assert_eq!(roster.status(), MatchStatus::Full);
    }

    #[test]
    fn leaving_without_waiters_reopens_match() {
        let mut roster = roster(2);
        roster.join("U2");
        assert!(roster.is_full());

        assert_eq!(roster.leave("U1"), LeaveOutcome::Left);
        assert_eq!(names(roster.participants()), ["U2"]);
        assert_eq!(roster.status(), MatchStatus::Open);
    }

    #[test]
    fn leaving_waiting_list_keeps_order_of_others() {
        let mut roster = roster(1);
        for user in ["U2", "U3", "U4"] {
            roster.join(user);
        }

        assert_eq!(roster.leave("U3"), LeaveOutcome::RemovedFromWaitingList);
        assert_eq!(names(roster.waiting_list()), ["U2", "U4"]);
        assert!(roster.is_full());
    }

    #[test]
    fn stranger_cannot_leave() {
        let mut roster = roster(DEFAULT_CAPACITY);
        let outcome = roster.leave("U9");
        assert_eq!(outcome, LeaveOutcome::NotParticipant);
        assert!(!outcome.is_success());
        assert_eq!(names(roster.participants()), ["U1"]);
    }

    #[test]
    fn lists_stay_disjoint_across_mixed_operations() {
        let mut roster = roster(3);
        let script: &[(&str, bool)] = &[
            ("U2", true),
            ("U3", true),
            ("U4", true),
            ("U5", true),
            ("U2", false),
            ("U4", true),
            ("U1", false),
            ("U2", true),
            ("U5", false),
            ("U6", true),
            ("U3", false),
        ];

        for (user, joining) in script {
            if *joining {
                roster.join(user);
            } else {
                roster.leave(user);
            }

            assert!(roster.participants().len() <= roster.capacity());
            assert!(
                roster
                    .participants()
                    .iter()
                    .all(|player| !roster.waiting_list().contains(player))
            );
            assert_eq!(
                roster.is_full(),
                roster.participants().len() == roster.capacity()
            );
            if !roster.waiting_list().is_empty() {
                assert!(roster.is_full());
            }
        }
    }

    #[test]
    fn cancelled_status_is_sticky() {
        let mut roster = roster(2);
        roster.mark_cancelled();
        roster.join("U2");
        assert_eq!(roster.status(), MatchStatus::Cancelled);
    }
}
