#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Client-side leaderboard mirror and score submission eligibility.
//!
//! The client never talks to a socket directly: inbound [`ServerMessage`]
//! values are fed in by the host shell, and the client answers with outbound
//! [`ClientMessage`] values plus [`Notice`] values for UI observers. The
//! mirror is a cached copy of the server's ranked list; it is replaced
//! wholesale on every snapshot and is never re-sorted locally.

use std::time::Duration;

use mole_rush_core::{LeaderboardEntry, SeatIdentity};

mod query_string;

pub use query_string::SessionIdentity;

/// Default cadence for refreshing the mirror while it is on screen.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(4);

/// Messages pushed by the leaderboard server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerMessage {
    /// The transport reported a successful connection.
    Connected,
    /// The server announced the maximum length of the ranked list.
    UpdateUpperLimit(i64),
    /// A previously sent submission was accepted.
    SubmissionSuccessful,
    /// A fresh ranked snapshot, or `None` when the server had nothing to send.
    ScoreUpdate(Option<Vec<LeaderboardEntry>>),
    /// The server's backing store rejected a write; logged, never fatal.
    DatabaseWriteFailed,
}

/// Messages the client asks the host shell to send upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMessage {
    /// Submits a floored score for the player's seat.
    SubmitScore {
        /// Floored score being submitted.
        score: u32,
        /// Seat the score belongs to.
        seat: SeatIdentity,
        /// Event the session signed into, if any.
        event_id: Option<String>,
    },
    /// Requests a fresh ranked snapshot for the event.
    UpdateTick {
        /// Event the session signed into, if any.
        event_id: Option<String>,
    },
}

/// Notifications for UI observers of the mirror.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The server connection was established.
    Connected,
    /// The mirror learned its capacity and is ready to display.
    ///
    /// Re-broadcast on every server announcement, but always carrying the
    /// first accepted capacity rather than the latest announced value.
    MirrorInitialized {
        /// Maximum number of ranked rows the mirror will hold.
        capacity: u32,
    },
    /// The mirror contents changed (or were re-broadcast unchanged).
    MirrorUpdated {
        /// Current mirror contents in server rank order.
        entries: Vec<LeaderboardEntry>,
    },
    /// A score submission was accepted by the server.
    SubmissionAccepted,
}

/// Outcome of the submission eligibility rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionDecision {
    /// The score should be sent upstream.
    Submit,
    /// The score is not worth sending.
    Skip(SkipReason),
}

/// Why a score was not submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The round did not produce a new high score, or the score is below one.
    NotANewHighScore,
    /// The seat already appears on the board with an equal or higher score.
    AlreadyRanked,
    /// The board is full and the score does not beat the lowest ranked entry.
    BelowCutoff,
    /// The session has no complete seat identity to submit under.
    MissingIdentity,
}

/// Pure protocol state machine mirroring the server-held leaderboard.
#[derive(Debug)]
pub struct LeaderboardClient {
    identity: SessionIdentity,
    update_interval: Duration,
    upper_limit: Option<u32>,
    mirror: Vec<LeaderboardEntry>,
    visible: bool,
    tick_counter: Duration,
}

impl LeaderboardClient {
    /// Creates a new client for the provided session identity.
    #[must_use]
    pub fn new(identity: SessionIdentity, update_interval: Duration) -> Self {
        Self {
            identity,
            update_interval,
            upper_limit: None,
            mirror: Vec::new(),
            visible: false,
            tick_counter: Duration::ZERO,
        }
    }

    /// Current mirror contents in server rank order.
    #[must_use]
    pub fn mirror(&self) -> &[LeaderboardEntry] {
        &self.mirror
    }

    /// Capacity learned from the server, once a positive value has arrived.
    #[must_use]
    pub fn upper_limit(&self) -> Option<u32> {
        self.upper_limit
    }

    /// Applies one inbound server message.
    pub fn handle_server(
        &mut self,
        message: ServerMessage,
        out_messages: &mut Vec<ClientMessage>,
        out_notices: &mut Vec<Notice>,
    ) {
        match message {
            ServerMessage::Connected => {
                log::info!("leaderboard server responded; connection established");
                out_notices.push(Notice::Connected);
            }
            ServerMessage::UpdateUpperLimit(limit) => {
                self.accept_upper_limit(limit);
                if let Some(capacity) = self.upper_limit {
                    out_notices.push(Notice::MirrorInitialized { capacity });
                }
                out_messages.push(ClientMessage::UpdateTick {
                    event_id: self.identity.event_id().map(str::to_owned),
                });
            }
            ServerMessage::SubmissionSuccessful => {
                out_notices.push(Notice::SubmissionAccepted);
            }
            ServerMessage::DatabaseWriteFailed => {
                // The game proceeds as if the submission succeeded; the
                // server owns retries, we only leave a trace.
                log::warn!("leaderboard store failed to persist a submission");
            }
            ServerMessage::ScoreUpdate(snapshot) => {
                self.merge_snapshot(snapshot);
                out_notices.push(Notice::MirrorUpdated {
                    entries: self.mirror.clone(),
                });
            }
        }
    }

    /// Accepts the server-announced capacity; only the first positive value
    /// sticks, later updates are ignored.
    fn accept_upper_limit(&mut self, limit: i64) {
        log::info!("leaderboard upper limit announced: {limit}");
        if self.upper_limit.is_some() {
            return;
        }
        if let Ok(positive) = u32::try_from(limit) {
            if positive > 0 {
                self.upper_limit = Some(positive);
            }
        }
    }

    /// Replaces the mirror wholesale; a missing snapshot leaves it untouched.
    fn merge_snapshot(&mut self, snapshot: Option<Vec<LeaderboardEntry>>) {
        if let Some(mut entries) = snapshot {
            if let Some(limit) = self.upper_limit {
                entries.truncate(limit as usize);
            }
            self.mirror = entries;
        }
    }

    /// Decides whether a round's score is worth sending upstream.
    ///
    /// `individual` is the score of the round that just ended and `high` the
    /// session's best; both are floored before any comparison. The rule never
    /// dedupes server-side entries, it only refuses to resubmit a seat that
    /// is already ranked at least as high.
    #[must_use]
    pub fn evaluate_submission(&self, individual: f64, high: f64) -> SubmissionDecision {
        if individual.floor() < high.floor() || high < 1.0 {
            return SubmissionDecision::Skip(SkipReason::NotANewHighScore);
        }

        let Some(seat) = self.identity.seat_identity() else {
            return SubmissionDecision::Skip(SkipReason::MissingIdentity);
        };

        let floored = high.floor() as u32;
        let already_ranked = self
            .mirror
            .iter()
            .any(|entry| entry.seat == seat && entry.high_score >= floored);
        if already_ranked {
            return SubmissionDecision::Skip(SkipReason::AlreadyRanked);
        }

        let capacity = self.upper_limit.unwrap_or(0) as usize;
        if self.mirror.len() < capacity {
            return SubmissionDecision::Submit;
        }

        match self.mirror.last() {
            Some(lowest) if lowest.high_score < floored => SubmissionDecision::Submit,
            _ => SubmissionDecision::Skip(SkipReason::BelowCutoff),
        }
    }

    /// Applies the eligibility rule and conditionally emits a submission.
    pub fn submit_score(
        &mut self,
        individual: f64,
        high: f64,
        out_messages: &mut Vec<ClientMessage>,
    ) -> SubmissionDecision {
        let decision = self.evaluate_submission(individual, high);
        match decision {
            SubmissionDecision::Submit => {
                let seat = self
                    .identity
                    .seat_identity()
                    .expect("submit decision requires a seat identity");
                out_messages.push(ClientMessage::SubmitScore {
                    score: high.floor() as u32,
                    seat,
                    event_id: self.identity.event_id().map(str::to_owned),
                });
            }
            SubmissionDecision::Skip(reason) => {
                log::info!("not submitting score: {reason:?}");
            }
        }
        decision
    }

    /// Shows or hides the leaderboard; showing it requests a fresh snapshot
    /// immediately and restarts the refresh counter.
    pub fn set_visible(&mut self, visible: bool, out_messages: &mut Vec<ClientMessage>) {
        self.visible = visible;
        if visible {
            out_messages.push(ClientMessage::UpdateTick {
                event_id: self.identity.event_id().map(str::to_owned),
            });
            self.tick_counter = Duration::ZERO;
        }
    }

    /// Advances the refresh counter; emits an update request once per
    /// interval while the leaderboard is on screen and the transport is up.
    pub fn tick(&mut self, dt: Duration, connected: bool, out_messages: &mut Vec<ClientMessage>) {
        if self.tick_counter >= self.update_interval && connected {
            self.tick_counter = Duration::ZERO;
            out_messages.push(ClientMessage::UpdateTick {
                event_id: self.identity.event_id().map(str::to_owned),
            });
        }
        if self.visible {
            self.tick_counter = self.tick_counter.saturating_add(dt);
        }
    }
}
