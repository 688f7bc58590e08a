//! Roster ingestion tests — CSV and JSON uploads, validation failures,
//! and the replace-only-on-success contract.

use chrono::{Local, TimeZone};
use opsdesk_core::{error::DeskError, roster::RosterTable, session::DeskSession};

fn now() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap()
}

#[test]
fn csv_upload_parses_and_validates() {
    let csv = "Team Name,Employee Name,Assignment Group,2025-03-07\n\
               Network,Arun,Network,Morning\n\
               Storage,Priya,Storage,Night\n";
    let table = RosterTable::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.headers.len(), 4);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][1], "Priya");
}

#[test]
fn csv_short_rows_are_padded_to_header_width() {
    let csv = "Team Name,Employee Name,Assignment Group,2025-03-07\n\
               Network,Arun\n";
    let table = RosterTable::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.rows[0].len(), 4);
    assert_eq!(table.rows[0][3], "");
}

#[test]
fn csv_without_group_column_is_rejected() {
    let csv = "Alpha,Beta,2025-03-07\nNetwork,Arun,Morning\n";
    let err = RosterTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DeskError::RosterColumnsMissing("assignment group")));
}

#[test]
fn csv_without_person_column_is_rejected() {
    // "Group Name" satisfies the group lookup; nothing else matches a
    // person keyword, so the second lookup fails.
    let csv = "Group Name,2025-03-07\nNetwork,Morning\n";
    let err = RosterTable::from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DeskError::RosterColumnsMissing("person")));
}

#[test]
fn json_upload_parses_and_validates() {
    let json = br#"{
        "headers": ["Team Name", "Employee Name", "Assignment Group", "2025-03-07"],
        "rows": [["Network", "Arun", "Network", "Morning"]]
    }"#;
    let table = RosterTable::from_json_slice(json).unwrap();
    assert_eq!(table.rows.len(), 1);
    assert!(table.validate().is_ok());
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = RosterTable::from_json_slice(b"{not json").unwrap_err();
    assert!(matches!(err, DeskError::Serialization(_)));
}

#[test]
fn failed_upload_keeps_the_previous_roster() {
    let mut session = DeskSession::new(11);
    assert!(session.login("admin", "admin", now()));

    let good = RosterTable::from_csv_reader(
        "Team Name,Employee Name,Assignment Group\nNetwork,Arun,Network\n".as_bytes(),
    )
    .unwrap();
    session.replace_roster(good.clone(), now());

    // A bad upload fails at parse time and never reaches the session.
    let bad = RosterTable::from_csv_reader("Alpha,Beta\nx,y\n".as_bytes());
    assert!(bad.is_err());
    assert_eq!(session.roster.as_ref(), Some(&good));
}

#[test]
fn generated_roster_installs_and_records() {
    let mut session = DeskSession::new(11);
    assert!(session.login("admin", "admin", now()));
    session.generate_roster(3, 2025, now()).unwrap();

    let roster = session.roster.as_ref().unwrap();
    assert!(roster.validate().is_ok());
    // 3 label columns + 31 days in March.
    assert_eq!(roster.headers.len(), 34);
    assert!(roster.people().count() >= 50); // 10 groups, 5-10 people each
}

#[test]
fn out_of_range_month_is_rejected() {
    let mut session = DeskSession::new(11);
    assert!(session.login("admin", "admin", now()));

    let err = session.generate_roster(13, 2025, now()).unwrap_err();
    assert!(matches!(err, DeskError::InvalidMonth(_)));
    let err = session.generate_roster(0, 2025, now()).unwrap_err();
    assert!(matches!(err, DeskError::InvalidMonth(_)));
    // The failed request installs nothing.
    assert!(session.roster.is_none());
}

#[test]
fn generated_roster_is_seed_deterministic() {
    let mut a = DeskSession::new(99);
    let mut b = DeskSession::new(99);
    a.generate_roster(3, 2025, now()).unwrap();
    b.generate_roster(3, 2025, now()).unwrap();
    assert_eq!(a.roster, b.roster);

    let mut c = DeskSession::new(100);
    c.generate_roster(3, 2025, now()).unwrap();
    assert_ne!(a.roster, c.roster);
}

#[test]
fn logout_discards_the_roster() {
    let mut session = DeskSession::new(11);
    assert!(session.login("admin", "admin", now()));
    session.generate_roster(3, 2025, now()).unwrap();
    assert!(session.roster.is_some());

    session.logout(now());
    assert!(session.roster.is_none());
    assert!(session.incidents.is_empty());
    assert!(session.events.is_empty());
    // The user directory survives teardown.
    assert!(session.login("admin", "admin", now()));
}
