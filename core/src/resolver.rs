//! Shift-based assignment resolver — the decision core of the desk.
//!
//! Given an assignment group and the current date/shift, discover the
//! on-duty candidates from the roster and rotate assignment across them
//! with a per-group round-robin pointer.
//!
//! Candidate discovery applies a cascading fallback:
//!   tier 1: today's cell names the current shift;
//!   tier 2: anyone apparently working today (cell is not WO/Leave/
//!           sentinel/weekend day-name), any shift;
//!   tier 3: anyone not explicitly on Leave — weekly-off included.
//! The first non-empty tier wins. If the roster has no column for
//! today's date, shift filtering is skipped entirely and the whole
//! group is returned (degraded mode).

use crate::{
    roster::{RosterTable, SENTINEL},
    shift::Shift,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Cell substrings that disqualify a person from the "working today"
/// tier. Day names cover rosters that fill weekends with placeholders.
const NOT_WORKING_MARKERS: &[&str] = &[
    "wo", "leave", "none", "thursday", "friday", "saturday", "sunday",
];

pub struct ShiftResolver {
    /// Last-used candidate index per group. Positional, not identity
    /// tracked: if the roster is regenerated between calls the stored
    /// index is reused against the new list.
    pointers: HashMap<String, usize>,
}

impl ShiftResolver {
    pub fn new() -> Self {
        Self { pointers: HashMap::new() }
    }

    /// Ordered candidate list for a group at the given date and shift.
    /// Empty means "no personnel available" — callers must surface that
    /// as a distinct failure status, never assign silently.
    pub fn candidates(
        roster: &RosterTable,
        group: &str,
        today: NaiveDate,
        shift: Shift,
    ) -> Vec<String> {
        let Some(group_col) = roster.group_column() else {
            return Vec::new();
        };
        let Some(person_col) = roster.person_column() else {
            return Vec::new();
        };
        let target = group.to_lowercase();

        let group_rows: Vec<&Vec<String>> = roster
            .people()
            .filter(|row| {
                row.get(group_col)
                    .is_some_and(|cell| cell.to_lowercase().contains(&target))
            })
            .collect();

        let names = |rows: &[&Vec<String>]| -> Vec<String> {
            rows.iter()
                .filter_map(|row| row.get(person_col))
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(SENTINEL))
                .collect()
        };

        let Some(date_col) = roster.date_column(today) else {
            // Degraded mode: no column matched today, return the whole group.
            log::debug!("no date column for {today}; degraded lookup for '{group}'");
            return names(&group_rows);
        };

        let cell = |row: &Vec<String>| -> String {
            row.get(date_col).map(|c| c.to_lowercase()).unwrap_or_default()
        };

        // Tier 1: exact shift match.
        let shift_name = shift.label().to_lowercase();
        let exact: Vec<&Vec<String>> = group_rows
            .iter()
            .filter(|row| cell(row).contains(&shift_name))
            .copied()
            .collect();
        if !exact.is_empty() {
            return names(&exact);
        }

        // Tier 2: anyone working today, regardless of shift.
        let working: Vec<&Vec<String>> = group_rows
            .iter()
            .filter(|row| {
                let c = cell(row);
                !NOT_WORKING_MARKERS.iter().any(|m| c.contains(m))
            })
            .copied()
            .collect();
        if !working.is_empty() {
            log::info!("'{group}': no {shift} staff today, relaxing to any working shift");
            return names(&working);
        }

        // Tier 3: emergency — anyone not explicitly on leave.
        let available: Vec<&Vec<String>> = group_rows
            .iter()
            .filter(|row| !cell(row).contains("leave"))
            .copied()
            .collect();
        if !available.is_empty() {
            log::warn!("'{group}': emergency fallback, pulling weekly-off staff");
        }
        names(&available)
    }

    /// Advance the group's round-robin pointer and pick the next
    /// candidate. N consecutive calls over a stable list of length N
    /// visit each candidate exactly once, in table order.
    pub fn next_assignee(&mut self, group: &str, candidates: &[String]) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        let next = match self.pointers.get(group) {
            Some(&last) => (last + 1) % candidates.len(),
            None => 0,
        };
        self.pointers.insert(group.to_string(), next);
        Some(candidates[next].clone())
    }

    /// Drop all pointers (session teardown).
    pub fn reset(&mut self) {
        self.pointers.clear();
    }
}

impl Default for ShiftResolver {
    fn default() -> Self {
        Self::new()
    }
}
