//! Ticket lifecycle tests — FIFO one-per-call processing and the two
//! terminal states a pass can produce.

use chrono::{Local, TimeZone};
use opsdesk_core::{
    advisor::Failover,
    incident::{self, TicketStatus, TriggerSource, UNASSIGNED},
    roster::RosterTable,
    session::DeskSession,
};

/// 09:00 local on a Friday — Morning shift.
fn morning() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap()
}

fn network_roster() -> RosterTable {
    RosterTable {
        headers: vec![
            "Team Name".to_string(),
            "Employee Name".to_string(),
            "Assignment Group".to_string(),
            "2025-03-07".to_string(),
        ],
        rows: vec![
            vec![
                "Network".to_string(),
                "Arun".to_string(),
                "Network".to_string(),
                "Morning".to_string(),
            ],
            vec![
                "Network".to_string(),
                "Bala".to_string(),
                "Network".to_string(),
                "Morning".to_string(),
            ],
        ],
    }
}

fn session_with_roster() -> DeskSession {
    let mut session = DeskSession::new(7);
    assert!(session.login("admin", "admin", morning()));
    session.replace_roster(network_roster(), morning());
    session
}

#[test]
fn one_ticket_per_call_in_fifo_order() {
    let mut session = session_with_roster();
    let now = morning();
    incident::trigger_incidents(&mut session, 3, TriggerSource::Event, Some("Network"), now);
    let ids: Vec<String> = session.incidents.iter().map(|t| t.ticket_id.clone()).collect();

    let advisor = Failover::offline();
    for (i, expected) in ids.iter().enumerate() {
        assert_eq!(session.assigned_backlog(), 3 - i);
        let feedback = incident::process_next(&mut session, &advisor, now).unwrap();
        assert_eq!(&feedback.ticket_id, expected);
    }
    assert_eq!(session.assigned_backlog(), 0);
}

#[test]
fn no_ticket_stays_assigned_after_a_pass() {
    let mut session = session_with_roster();
    let now = morning();
    incident::trigger_incidents(&mut session, 4, TriggerSource::Event, None, now);

    let advisor = Failover::offline();
    while incident::process_next(&mut session, &advisor, now).is_some() {}

    for t in &session.incidents {
        assert_ne!(t.status, TicketStatus::Assigned, "{} untouched", t.ticket_id);
        assert!(matches!(
            t.status,
            TicketStatus::InProgress | TicketStatus::AssignedNoRoster
        ));
    }
}

#[test]
fn successful_pass_fills_every_field() {
    let mut session = session_with_roster();
    let now = morning();
    incident::trigger_incidents(&mut session, 1, TriggerSource::User, Some("Network"), now);

    let advisor = Failover::offline();
    let feedback = incident::process_next(&mut session, &advisor, now).unwrap();
    assert!(feedback.assigned);
    assert!(feedback.email_sent && feedback.teams_sent);
    assert!(feedback.voice.is_some());

    let t = &session.incidents[0];
    assert_eq!(t.status, TicketStatus::InProgress);
    assert_eq!(t.assigned_to, feedback.assignee);
    assert_ne!(t.assigned_to, UNASSIGNED);
    assert_ne!(t.recommendation, "Pending Analysis...");
    assert!(t.notes.contains("Ticket assigned to"));
    assert!(t.notes.contains("[Email & Teams Sent]"));
    assert!(t.pdf_bytes.as_deref().is_some_and(|b| b.starts_with(b"%PDF")));
    assert!(t.description.starts_with("User Reported: "));
}

#[test]
fn missing_roster_routes_to_no_roster_state() {
    let mut session = DeskSession::new(7);
    assert!(session.login("admin", "admin", morning()));
    let now = morning();
    incident::trigger_incidents(&mut session, 1, TriggerSource::Event, Some("Network"), now);

    let advisor = Failover::offline();
    let feedback = incident::process_next(&mut session, &advisor, now).unwrap();
    assert!(!feedback.assigned);
    assert_eq!(feedback.assignee, UNASSIGNED);
    assert!(feedback.voice.is_none());
    assert!(!feedback.email_sent && !feedback.teams_sent);

    let t = &session.incidents[0];
    assert_eq!(t.status, TicketStatus::AssignedNoRoster);
    assert_eq!(t.assigned_to, UNASSIGNED);
    assert!(t.recommendation.starts_with("ACTION REQUIRED"));
    assert!(t.recommendation.contains("'Network'"));
    // The failure note names the shift that had no staff.
    assert!(t.notes.contains("Morning"));
}

#[test]
fn empty_queue_returns_none() {
    let mut session = session_with_roster();
    let advisor = Failover::offline();
    assert!(incident::process_next(&mut session, &advisor, morning()).is_none());
}

#[test]
fn trigger_marks_all_new_tickets_assigned() {
    let mut session = session_with_roster();
    let now = morning();
    let n = incident::trigger_incidents(&mut session, 5, TriggerSource::Event, None, now);
    assert_eq!(n, 5);
    assert_eq!(session.incidents.len(), 5);
    for t in &session.incidents {
        assert_eq!(t.status, TicketStatus::Assigned);
        assert_eq!(t.assigned_to, UNASSIGNED);
        assert_eq!(t.recommendation, "Pending Analysis...");
        assert!(t.ticket_id.starts_with("INC"));
        assert!(t.description.starts_with("[Alert] "));
    }
}
