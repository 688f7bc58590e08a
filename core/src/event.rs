//! Session event log — every state change the desk makes is recorded
//! here for the duration of the session. Nothing is persisted.

use crate::types::{GroupName, SessionId, TicketId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Every event emitted during a session.
/// Variants are added as features land — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    SessionOpened {
        session_id: SessionId,
        username: String,
    },
    SessionClosed {
        username: String,
    },
    RosterGenerated {
        month: u32,
        year: i32,
        rows: usize,
    },
    RosterReplaced {
        rows: usize,
    },
    IncidentsTriggered {
        count: usize,
        source: String,
        target_group: String,
    },
    TicketAssigned {
        ticket_id: TicketId,
        group: GroupName,
        assignee: String,
        shift: String,
    },
    TicketAssignmentFailed {
        ticket_id: TicketId,
        group: GroupName,
        shift: String,
    },
    QueueDrained {
        processed: usize,
    },
}

/// Extract a stable string name from a DeskEvent variant.
pub fn event_type_name(event: &DeskEvent) -> &'static str {
    match event {
        DeskEvent::SessionOpened { .. } => "session_opened",
        DeskEvent::SessionClosed { .. } => "session_closed",
        DeskEvent::RosterGenerated { .. } => "roster_generated",
        DeskEvent::RosterReplaced { .. } => "roster_replaced",
        DeskEvent::IncidentsTriggered { .. } => "incidents_triggered",
        DeskEvent::TicketAssigned { .. } => "ticket_assigned",
        DeskEvent::TicketAssignmentFailed { .. } => "ticket_assignment_failed",
        DeskEvent::QueueDrained { .. } => "queue_drained",
    }
}

/// One logged event with its wall-clock timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub at: DateTime<Local>,
    pub event: DeskEvent,
}
