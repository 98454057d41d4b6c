//! Display helpers for task fields.
//!
//! Date checks take `today` explicitly so callers decide which clock to
//! use; the console front end passes [`today`].

use super::task::Priority;
use chrono::{Local, NaiveDate};

/// Days ahead (inclusive) that count as "due soon".
pub const DUE_SOON_DAYS: i64 = 3;

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a due date as `Nov 10, 2025`, or `No due date` when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "No due date".to_string(),
    }
}

/// `true` when the due date lies strictly before `today`.
pub fn is_past_due(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_date.map(|due| due < today).unwrap_or(false)
}

/// `true` when the due date is between `today` and three days ahead.
pub fn is_due_soon(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => {
            let days = (due - today).num_days();
            (0..=DUE_SOON_DAYS).contains(&days)
        }
        None => false,
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

/// Hex color associated with a priority badge.
pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "#f44336",
        Priority::Medium => "#ff9800",
        Priority::Low => "#2196f3",
    }
}
