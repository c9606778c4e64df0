//! Loan overdue rule
//!
//! A copy is overdue once its due-back date lies strictly before today.
//! The loan status plays no part in the decision.

use chrono::{Local, NaiveDate};

/// Returns `true` when `due_back` is set and falls before `today`.
///
/// A copy due back today is not overdue yet, and a copy without a due-back
/// date is never overdue.
pub fn is_overdue(due_back: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(due_back, Some(due) if due < today)
}

/// Current date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
