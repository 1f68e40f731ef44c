use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::{ReportWindow, Result};
use crate::modules::reports::models::{
    ExpenseStatus, MetricFilter, TimeColumn, WeeklyReport,
};
use crate::modules::reports::repositories::ReportRepository;

/// Collects the weekly metrics and assembles the report.
pub struct ReportService<R: ReportRepository> {
    repo: R,
    /// Operator account excluded from donation and expense metrics
    operator_collective_id: i64,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R, operator_collective_id: i64) -> Self {
        Self {
            repo,
            operator_collective_id,
        }
    }

    /// Generate the report for the week containing `reference`.
    ///
    /// All metric queries run concurrently; the report fails as a whole if
    /// any one of them fails.
    pub async fn generate(&self, reference: DateTime<Utc>) -> Result<WeeklyReport> {
        let window = ReportWindow::containing(reference);

        info!(
            from = %window.last_week_start,
            to = %window.this_week_start,
            "Collecting weekly metrics"
        );

        let donations = MetricFilter::new()
            .with_time_window(window)
            .positive_amounts()
            .excluding(self.operator_collective_id);

        let new_expenses = MetricFilter::new()
            .with_time_window(window)
            .excluding(self.operator_collective_id);

        // Expense rows are debits, stored negative; the sign constraint
        // keeps a miskeyed positive row out of the paid totals.
        let paid_expenses = MetricFilter::new()
            .within(window, TimeColumn::UpdatedAt)
            .with_status(ExpenseStatus::Paid)
            .negative_amounts()
            .excluding(self.operator_collective_id);

        let in_window = MetricFilter::new().with_time_window(window);

        let (
            donation_count,
            donation_totals,
            new_expense_count,
            paid_expense_count,
            paid_expense_totals,
            new_collective_count,
            new_collectives,
            active_in_transactions,
            active_in_expenses,
        ) = tokio::try_join!(
            self.repo.count_donations(&donations),
            self.repo.donation_totals(&donations),
            self.repo.count_new_expenses(&new_expenses),
            self.repo.count_paid_expenses(&paid_expenses),
            self.repo.paid_expense_totals(&paid_expenses),
            self.repo.count_new_collectives(&in_window),
            self.repo.list_new_collectives(&in_window),
            self.repo.active_collectives_in_transactions(&in_window),
            self.repo.active_collectives_in_expenses(&in_window),
        )?;

        // A collective is active if it saw either a transaction or an
        // expense this week; the two id lists overlap, hence the set union.
        let active: BTreeSet<i64> = active_in_transactions
            .into_iter()
            .chain(active_in_expenses)
            .collect();

        Ok(WeeklyReport {
            window: window.into(),
            donation_count,
            donation_totals,
            new_expense_count,
            paid_expense_count,
            paid_expense_totals,
            new_collective_count,
            new_collectives,
            active_collective_count: active.len(),
        })
    }
}

// Query execution paths are covered by the external integration suite; the
// derivation and rendering logic is unit-tested with a stub repository in
// tests/unit/report_render_test.rs.
