//! The session context — all mutable state for one browser-session
//! equivalent, owned explicitly and passed to each operation.
//!
//! RULES:
//!   - No globals. Every operation receives the session it acts on.
//!   - Single user, single thread: operations are synchronous and the
//!     caller's loop owns the polling cadence.
//!   - Nothing survives the session. Logout is the teardown.

use crate::{
    advisor::Failover,
    auth::UserDirectory,
    clock::AutoAssignTimer,
    error::{DeskError, DeskResult},
    event::{DeskEvent, LoggedEvent},
    incident::{self, Incident, ProcessFeedback, TicketStatus},
    resolver::ShiftResolver,
    rng::{DeskRng, RngBank, StreamSlot},
    roster::RosterTable,
    types::SessionId,
};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Outcome of one cooperative poll cycle.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// No timer armed, nothing active.
    Idle,
    /// Timer armed but not yet due; seconds until processing begins.
    Waiting { remaining_secs: i64 },
    /// One ticket was processed this cycle.
    Processed(ProcessFeedback),
    /// The Assigned queue is empty; draining stopped.
    Drained,
}

pub struct DeskSession {
    pub session_id: SessionId,
    pub users: UserDirectory,
    pub username: Option<String>,
    pub roster: Option<RosterTable>,
    pub incidents: Vec<Incident>,
    pub resolver: ShiftResolver,
    pub timer: AutoAssignTimer,
    pub events: Vec<LoggedEvent>,
    pub incident_rng: DeskRng,
    pub roster_rng: DeskRng,
    processed_this_drain: usize,
}

impl DeskSession {
    /// Fresh session with defined initial state: default user
    /// directory, no roster, no incidents, deterministic RNG streams
    /// derived from the seed.
    pub fn new(seed: u64) -> Self {
        let bank = RngBank::new(seed);
        Self {
            session_id: Uuid::new_v4().to_string(),
            users: UserDirectory::new(),
            username: None,
            roster: None,
            incidents: Vec::new(),
            resolver: ShiftResolver::new(),
            timer: AutoAssignTimer::new(),
            events: Vec::new(),
            incident_rng: bank.for_stream(StreamSlot::Incident),
            roster_rng: bank.for_stream(StreamSlot::Roster),
            processed_this_drain: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Plaintext credential check; on success the session is bound to
    /// the user.
    pub fn login(&mut self, username: &str, password: &str, now: DateTime<Local>) -> bool {
        if !self.users.check(username, password) {
            log::info!("rejected login for '{username}'");
            return false;
        }
        self.username = Some(username.to_string());
        let session_id = self.session_id.clone();
        self.record(
            DeskEvent::SessionOpened { session_id, username: username.to_string() },
            now,
        );
        true
    }

    /// Per-session teardown: discards roster, incidents, round-robin
    /// pointers, timer, and the event log. The user directory survives
    /// so re-login works.
    pub fn logout(&mut self, now: DateTime<Local>) {
        if let Some(username) = self.username.take() {
            self.record(DeskEvent::SessionClosed { username }, now);
        }
        self.roster = None;
        self.incidents.clear();
        self.resolver.reset();
        self.timer.reset();
        self.events.clear();
        self.processed_this_drain = 0;
    }

    /// Replace the roster wholesale. Ingestion errors are surfaced
    /// before this point, so a failed upload never reaches here and
    /// the previous roster is retained.
    pub fn replace_roster(&mut self, table: RosterTable, now: DateTime<Local>) {
        let rows = table.rows.len();
        self.roster = Some(table);
        log::info!("roster replaced ({rows} rows)");
        self.record(DeskEvent::RosterReplaced { rows }, now);
    }

    /// Generate and install a demo roster for the given month.
    pub fn generate_roster(
        &mut self,
        month: u32,
        year: i32,
        now: DateTime<Local>,
    ) -> DeskResult<()> {
        if !(1..=12).contains(&month) {
            return Err(DeskError::InvalidMonth(month.to_string()));
        }
        let table = RosterTable::generate(month, year, &mut self.roster_rng);
        let rows = table.rows.len();
        self.roster = Some(table);
        log::info!("generated demo roster for {year}-{month:02} ({rows} rows)");
        self.record(DeskEvent::RosterGenerated { month, year, rows }, now);
        Ok(())
    }

    /// Arm the auto-assignment timer: draining starts `delay_secs`
    /// after `now`, driven by subsequent poll() calls.
    pub fn arm_auto_assign(&mut self, now: DateTime<Local>, delay_secs: i64) {
        self.timer.arm(now, delay_secs);
        self.processed_this_drain = 0;
    }

    /// One cooperative cycle: flip the timer when due, then process at
    /// most one Assigned ticket. The caller re-invokes on its own
    /// cadence until Drained (or Idle).
    pub fn poll(&mut self, advisor: &Failover<'_>, now: DateTime<Local>) -> PollOutcome {
        if self.timer.is_due(now) {
            self.timer.activate();
        }

        if self.timer.active {
            match incident::process_next(self, advisor, now) {
                Some(feedback) => {
                    self.processed_this_drain += 1;
                    PollOutcome::Processed(feedback)
                }
                None => {
                    self.timer.finish();
                    let processed = std::mem::take(&mut self.processed_this_drain);
                    self.record(DeskEvent::QueueDrained { processed }, now);
                    PollOutcome::Drained
                }
            }
        } else if self.timer.is_armed() {
            PollOutcome::Waiting { remaining_secs: self.timer.remaining_secs(now) }
        } else {
            PollOutcome::Idle
        }
    }

    /// Tickets still waiting for a processing pass.
    pub fn assigned_backlog(&self) -> usize {
        self.incidents
            .iter()
            .filter(|t| t.status == TicketStatus::Assigned)
            .count()
    }

    pub fn record(&mut self, event: DeskEvent, now: DateTime<Local>) {
        self.events.push(LoggedEvent { at: now, event });
    }
}
