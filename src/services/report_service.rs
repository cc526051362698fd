//! Monthly report aggregation and text rendering.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::payment::PaymentStatus;
use crate::domain::report::{MonthlyReport, ReportMonth};
use crate::store::{PaymentRepository, SubscriptionRepository, UserRepository};

pub struct ReportService {
    users: Arc<Mutex<UserRepository>>,
    subscriptions: Arc<Mutex<SubscriptionRepository>>,
    payments: Arc<Mutex<PaymentRepository>>,
}

impl ReportService {
    pub fn new(
        users: Arc<Mutex<UserRepository>>,
        subscriptions: Arc<Mutex<SubscriptionRepository>>,
        payments: Arc<Mutex<PaymentRepository>>,
    ) -> Self {
        Self {
            users,
            subscriptions,
            payments,
        }
    }

    /// Aggregates one user's month: currently active subscriptions plus the
    /// payments dated inside the requested (year, month).
    ///
    /// A user with no matching subscriptions or payments gets an empty
    /// report with zero totals, not an error.
    ///
    /// # Errors
    ///
    /// Not-found error when the user id is unknown.
    pub fn generate_monthly_report(
        &self,
        user_id: &UserId,
        month: ReportMonth,
    ) -> Result<MonthlyReport, DomainError> {
        let user = self
            .users
            .lock()
            .expect("user repository lock poisoned")
            .get(user_id)
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        let active_subscriptions: Vec<_> = self
            .subscriptions
            .lock()
            .expect("subscription repository lock poisoned")
            .find_by_user(user_id)
            .into_iter()
            .filter(|s| s.is_active())
            .collect();

        let payments: Vec<_> = self
            .payments
            .lock()
            .expect("payment repository lock poisoned")
            .find_by_user(user_id)
            .into_iter()
            .filter(|p| month.contains(&p.payment_date))
            .collect();

        let total_amount_billed = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Success)
            .map(|p| p.amount)
            .sum();
        let failed_payments = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Failed)
            .count();

        tracing::debug!(
            user_id = %user_id,
            period = %month,
            subscriptions = active_subscriptions.len(),
            payments = payments.len(),
            "report generated"
        );

        Ok(MonthlyReport {
            user_id: *user_id,
            user_name: user.name,
            month,
            active_subscriptions,
            payments,
            total_amount_billed,
            failed_payments,
        })
    }

    /// Renders the fixed multi-section text layout for a report.
    pub fn export_report_to_string(&self, report: &MonthlyReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== MONTHLY SUBSCRIPTION REPORT ===");
        let _ = writeln!(out, "User: {}", report.user_name);
        let _ = writeln!(out, "Period: {}", report.month);
        let _ = writeln!(out);

        let _ = writeln!(out, "Active Subscriptions:");
        for sub in &report.active_subscriptions {
            let _ = writeln!(
                out,
                "  - {}: ${:.2}/{}",
                sub.plan_name, sub.cost, sub.renewal_frequency
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Payment History:");
        for payment in &report.payments {
            let _ = writeln!(
                out,
                "  - {}: ${:.2} - {}",
                payment.payment_date.date_string(),
                payment.amount,
                payment.status
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Total Billed: ${:.2}", report.total_amount_billed);
        let _ = writeln!(out, "Failed Payments: {}", report.failed_payments);

        out
    }
}
