//! Shift resolver tests — candidate discovery, tiered fallback
//! ordering, and degraded mode.

use chrono::NaiveDate;
use opsdesk_core::{resolver::ShiftResolver, roster::RosterTable, shift::Shift};

const TODAY_HEADER: &str = "2025-03-07";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
}

/// Build a roster with the standard three label columns plus one date
/// column, one row per (name, shift-cell) pair in group "Network".
fn network_roster(people: &[(&str, &str)]) -> RosterTable {
    let headers = vec![
        "Team Name".to_string(),
        "Employee Name".to_string(),
        "Assignment Group".to_string(),
        TODAY_HEADER.to_string(),
    ];
    let mut rows = vec![vec![
        "None".to_string(),
        "None".to_string(),
        "None".to_string(),
        "Friday".to_string(),
    ]];
    for (name, cell) in people {
        rows.push(vec![
            "Network".to_string(),
            name.to_string(),
            "Network".to_string(),
            cell.to_string(),
        ]);
    }
    RosterTable { headers, rows }
}

#[test]
fn exact_shift_match_wins() {
    let roster = network_roster(&[("Arun", "Morning"), ("Bala", "Afternoon")]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Arun"]);
}

#[test]
fn tier_one_preferred_over_tier_two() {
    // Bala works Morning today; with a Night shift requested, tier 1
    // still matches Arun's Night cell, so tier 2 must never run.
    let roster = network_roster(&[("Arun", "Night"), ("Bala", "Morning")]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Night);
    assert_eq!(candidates, vec!["Arun"]);
}

#[test]
fn tier_two_relaxes_to_any_working_shift() {
    // Nobody is on Night, but two people work other shifts today.
    let roster = network_roster(&[
        ("Arun", "Morning"),
        ("Bala", "Afternoon"),
        ("Priya", "WO"),
        ("Deepak", "Leave"),
    ]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Night);
    assert_eq!(candidates, vec!["Arun", "Bala"]);
}

#[test]
fn tier_three_pulls_weekly_off_as_last_resort() {
    // Everyone on Leave except one weekly-off person: only the
    // emergency tier may produce them.
    let roster = network_roster(&[("Arun", "Leave"), ("Bala", "Leave"), ("Priya", "WO")]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Priya"]);
}

#[test]
fn leave_everywhere_yields_no_personnel() {
    let roster = network_roster(&[("Arun", "Leave"), ("Bala", "Leave")]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert!(candidates.is_empty());
}

#[test]
fn on_duty_group_never_resolves_empty() {
    // Any roster with at least one non-Leave member must produce a
    // candidate through some tier.
    for cell in ["Morning", "Afternoon", "Night", "General", "WO"] {
        let roster = network_roster(&[("Arun", cell)]);
        let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
        assert!(
            !candidates.is_empty(),
            "no personnel for cell '{cell}' despite Arun being available"
        );
    }
}

#[test]
fn degraded_mode_without_date_column() {
    // Header for a different date: shift filtering is skipped and the
    // whole group comes back, Leave included.
    let mut roster = network_roster(&[("Arun", "Leave"), ("Bala", "Night")]);
    roster.headers[3] = "2025-03-09".to_string();
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Arun", "Bala"]);
}

#[test]
fn group_match_is_case_insensitive_substring() {
    let roster = network_roster(&[("Arun", "Morning")]);
    let candidates = ShiftResolver::candidates(&roster, "network", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Arun"]);

    let candidates = ShiftResolver::candidates(&roster, "Net", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Arun"]);

    let candidates = ShiftResolver::candidates(&roster, "Storage", today(), Shift::Morning);
    assert!(candidates.is_empty());
}

#[test]
fn sentinel_and_blank_rows_are_skipped() {
    let mut roster = network_roster(&[("Arun", "Morning")]);
    // A blank person cell and an explicit "none" person cell.
    roster.rows.push(vec![
        "Network".to_string(),
        String::new(),
        "Network".to_string(),
        "Morning".to_string(),
    ]);
    roster.rows.push(vec![
        "Network".to_string(),
        "None".to_string(),
        "Network".to_string(),
        "Morning".to_string(),
    ]);
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert_eq!(candidates, vec!["Arun"]);
}

#[test]
fn unlocatable_columns_resolve_empty() {
    let roster = RosterTable {
        headers: vec!["Alpha".to_string(), "Beta".to_string(), TODAY_HEADER.to_string()],
        rows: vec![vec![
            "Network".to_string(),
            "Arun".to_string(),
            "Morning".to_string(),
        ]],
    };
    let candidates = ShiftResolver::candidates(&roster, "Network", today(), Shift::Morning);
    assert!(candidates.is_empty());
}
