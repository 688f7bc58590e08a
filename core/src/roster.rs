//! Shift roster table — loosely structured, column layout discovered at
//! use time rather than declared up front.
//!
//! A roster is whatever the user uploaded (or generated): a header row
//! plus string cells. The resolver finds the group/person columns by
//! fuzzy keyword matching and today's column by date-substring matching,
//! so uploads survive cosmetic header differences. Rows whose team-name
//! field carries the sentinel value are layout rows (day names), not
//! people, and are skipped everywhere.

use crate::{
    advisor::ASSIGNMENT_GROUPS,
    error::{DeskError, DeskResult},
    rng::DeskRng,
};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Team-name value marking a header/placeholder row.
pub const SENTINEL: &str = "none";

/// Keywords identifying the assignment-group column.
pub const GROUP_KEYWORDS: &[&str] = &["assignment", "group", "team"];

/// Keywords identifying the person column. The person column must
/// differ from the group column ("Team Name" also matches "name").
pub const PERSON_KEYWORDS: &[&str] = &["person", "employee", "staff", "engineer", "name"];

/// Date formats tried when matching today against column headers.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"];

const SHIFT_ROTATION: &[&str] = &["Morning", "Afternoon", "Night", "General"];

const NAMES_POOL: &[&str] = &[
    "Arun", "Bala", "Sampath", "Sathish", "Murugan", "Priya", "Aparana", "Shan",
    "Karthik", "Bharathi", "Deepak", "Anitha", "Ramesh", "Suresh", "Lakshmi",
    "Kavita", "Rahul", "Pooja", "Vikram", "Sneha",
];

/// Best-effort fuzzy column lookup: returns the first header that
/// contains any keyword (case-insensitive), skipping `exclude` so a
/// second lookup can be forced onto a different column.
pub fn locate_column(
    headers: &[String],
    keywords: &[&str],
    exclude: Option<usize>,
) -> Option<usize> {
    headers.iter().enumerate().find_map(|(i, h)| {
        if Some(i) == exclude {
            return None;
        }
        let h = h.to_lowercase();
        keywords.iter().any(|k| h.contains(k)).then_some(i)
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    /// Parse a CSV upload. The previous roster is only replaced by the
    /// caller on success, so a malformed file leaves it untouched.
    pub fn from_csv_reader<R: Read>(reader: R) -> DeskResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        let table = Self { headers, rows };
        table.validate()?;
        Ok(table)
    }

    /// Parse a JSON upload of the shape `{"headers": [...], "rows": [[...]]}`.
    pub fn from_json_slice(bytes: &[u8]) -> DeskResult<Self> {
        let table: RosterTable = serde_json::from_slice(bytes)?;
        table.validate()?;
        Ok(table)
    }

    /// The resolver tolerates anything it can locate columns in; an
    /// upload where it cannot is rejected wholesale.
    pub fn validate(&self) -> DeskResult<()> {
        let group = self
            .group_column()
            .ok_or(DeskError::RosterColumnsMissing("assignment group"))?;
        if locate_column(&self.headers, PERSON_KEYWORDS, Some(group)).is_none() {
            return Err(DeskError::RosterColumnsMissing("person"));
        }
        Ok(())
    }

    pub fn group_column(&self) -> Option<usize> {
        locate_column(&self.headers, GROUP_KEYWORDS, None)
    }

    pub fn person_column(&self) -> Option<usize> {
        let group = self.group_column();
        locate_column(&self.headers, PERSON_KEYWORDS, group)
    }

    /// Column whose header contains today's date in any common format.
    /// None means degraded mode: shift filtering is skipped entirely.
    pub fn date_column(&self, today: NaiveDate) -> Option<usize> {
        let variants: Vec<String> = DATE_FORMATS
            .iter()
            .map(|fmt| today.format(fmt).to_string())
            .collect();
        self.headers
            .iter()
            .position(|h| variants.iter().any(|v| h.contains(v.as_str())))
    }

    /// True for layout rows (day-name headers) that must never be
    /// treated as personnel.
    pub fn is_sentinel_row(row: &[String]) -> bool {
        row.first()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(SENTINEL))
    }

    /// People rows only, in table order.
    pub fn people(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter().filter(|r| !Self::is_sentinel_row(r))
    }

    /// Generate a demo roster for one month: a day-name sentinel row,
    /// then 5-10 people per assignment group. Weekdays run the person's
    /// base shift with an occasional Leave; weekends are mostly WO with
    /// skeleton coverage so off-hours assignment stays testable.
    pub fn generate(month: u32, year: i32, rng: &mut DeskRng) -> Self {
        let days = month_days(year, month);

        let mut headers = vec![
            "Team Name".to_string(),
            "Employee Name".to_string(),
            "Assignment Group".to_string(),
        ];
        headers.extend(days.iter().map(|d| d.format("%Y-%m-%d").to_string()));

        let mut sentinel = vec![
            SENTINEL.to_string(),
            SENTINEL.to_string(),
            SENTINEL.to_string(),
        ];
        sentinel.extend(days.iter().map(|d| d.format("%A").to_string()));

        let mut rows = vec![sentinel];
        for group in ASSIGNMENT_GROUPS {
            let count = 5 + rng.next_u64_below(6) as usize;
            let order = rng.shuffled_indices(NAMES_POOL.len());
            for (i, name_idx) in order.into_iter().take(count).enumerate() {
                let base_shift = SHIFT_ROTATION[i % SHIFT_ROTATION.len()];
                let mut row = vec![
                    group.to_string(),
                    NAMES_POOL[name_idx].to_string(),
                    group.to_string(),
                ];
                for day in &days {
                    let cell = if is_weekend(*day) {
                        if rng.chance(0.6) { "WO" } else { base_shift }
                    } else if rng.chance(0.05) {
                        "Leave"
                    } else {
                        base_shift
                    };
                    row.push(cell.to_string());
                }
                rows.push(row);
            }
        }

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Map a three-letter month name (JAN..DEC) to its number.
pub fn month_number(name: &str) -> DeskResult<u32> {
    const MONTHS: &[&str] = &[
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN",
        "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| DeskError::InvalidMonth(name.to_string()))
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"));
    while day.month() == month {
        days.push(day);
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}
