//! Monthly report aggregate and its period value object.

use std::fmt;

use super::foundation::{DomainError, Timestamp, UserId};
use super::payment::Payment;
use super::subscription::Subscription;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar (year, month) pair; the reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Creates a report month, validating `month` is 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(
                "month",
                format!("month must be between 1 and 12, got {}", month),
            ));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether a timestamp falls inside this (year, month); the day is
    /// ignored.
    pub fn contains(&self, ts: &Timestamp) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }
}

impl fmt::Display for ReportMonth {
    /// `"January 2025"` style label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

/// Derived, non-persistent snapshot of one user's month: currently active
/// subscriptions plus that month's payments and their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub user_id: UserId,
    pub user_name: String,
    pub month: ReportMonth,
    pub active_subscriptions: Vec<Subscription>,
    pub payments: Vec<Payment>,
    pub total_amount_billed: f64,
    pub failed_payments: usize,
}
