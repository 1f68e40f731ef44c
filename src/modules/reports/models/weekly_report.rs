use serde::{Deserialize, Serialize};

use crate::core::money::format_minor_units;
use crate::core::ReportWindow;

/// Sum of ledger amounts for one currency, in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total: i64,
}

/// Slug and tag list of a newly created collective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveSummary {
    pub slug: String,
    pub tags: Vec<String>,
}

impl CollectiveSummary {
    /// `slug (tag1, tag2)`; an untagged collective renders as `slug ()`.
    fn label(&self) -> String {
        format!("{} ({})", self.slug, self.tags.join(", "))
    }
}

/// All metrics collected for one reporting week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub window: ReportWindowDates,
    pub donation_count: i64,
    /// Donation sums per currency, ordered by currency code
    pub donation_totals: Vec<CurrencyTotal>,
    pub new_expense_count: i64,
    pub paid_expense_count: i64,
    /// Paid-expense sums per currency; stored negative in the ledger
    pub paid_expense_totals: Vec<CurrencyTotal>,
    pub new_collective_count: i64,
    pub new_collectives: Vec<CollectiveSummary>,
    /// Distinct collectives with any transaction or expense in the window
    pub active_collective_count: usize,
}

/// Window boundary dates carried on the report for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindowDates {
    pub from: chrono::NaiveDate,
    pub to: chrono::NaiveDate,
}

impl From<ReportWindow> for ReportWindowDates {
    fn from(window: ReportWindow) -> Self {
        Self {
            from: window.last_week_start.date_naive(),
            to: window.this_week_start.date_naive(),
        }
    }
}

impl WeeklyReport {
    /// Render the fixed multi-line text template delivered to the webhook.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!(
                "Weekly activity summary ({} to {})",
                self.window.from, self.window.to
            ),
            String::new(),
            "Donations".to_string(),
        ];

        push_money_lines(
            &mut lines,
            self.donation_count,
            "donations received",
            &self.donation_totals,
            false,
        );

        lines.push(String::new());
        lines.push("Expenses".to_string());
        lines.push(format!("- {} new expenses submitted", self.new_expense_count));
        push_money_lines(
            &mut lines,
            self.paid_expense_count,
            "expenses paid",
            &self.paid_expense_totals,
            true,
        );

        lines.push(String::new());
        lines.push("Collectives".to_string());
        if self.new_collectives.is_empty() {
            lines.push(format!(
                "- {} new collectives created",
                self.new_collective_count
            ));
        } else {
            let labels: Vec<String> = self.new_collectives.iter().map(|c| c.label()).collect();
            lines.push(format!(
                "- {} new collectives created: {}",
                self.new_collective_count,
                labels.join(", ")
            ));
        }
        lines.push(format!("- {} active collectives", self.active_collective_count));

        lines.join("\n")
    }
}

/// Count line plus one indented bullet per currency. Expense sums arrive
/// negative from the ledger and are sign-flipped for display; the stored
/// sign convention is preserved upstream on purpose.
fn push_money_lines(
    lines: &mut Vec<String>,
    count: i64,
    label: &str,
    totals: &[CurrencyTotal],
    negate: bool,
) {
    if totals.is_empty() {
        lines.push(format!("- {} {}", count, label));
        return;
    }

    lines.push(format!("- {} {} totaling:", count, label));
    for total in totals {
        let amount = if negate { -total.total } else { total.total };
        lines.push(format!("  * {}", format_minor_units(amount, &total.currency)));
    }
}
