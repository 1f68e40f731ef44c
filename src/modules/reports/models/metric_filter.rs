use std::collections::{BTreeMap, BTreeSet};

use sqlx::{MySql, QueryBuilder};

use crate::core::ReportWindow;

/// Timestamp column a time-window constraint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeColumn {
    CreatedAt,
    UpdatedAt,
}

impl TimeColumn {
    fn name(self) -> &'static str {
        match self {
            TimeColumn::CreatedAt => "created_at",
            TimeColumn::UpdatedAt => "updated_at",
        }
    }
}

/// Expense lifecycle states recognized by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Paid,
}

impl ExpenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "PENDING",
            ExpenseStatus::Approved => "APPROVED",
            ExpenseStatus::Paid => "PAID",
        }
    }
}

/// Sign constraint on the ledger amount column: donations are positive rows,
/// expense debits negative rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AmountSign {
    Positive,
    Negative,
}

/// Typed, composable query filter.
///
/// Every combinator adds a constraint; constraints are held in sets and maps
/// so that merging two filters is a pure conjunction: nothing in either side
/// is ever dropped, and merging a filter with itself is a no-op. Two windows
/// on the same column intersect to the narrower interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFilter {
    windows: BTreeMap<TimeColumn, ReportWindow>,
    signs: BTreeSet<AmountSign>,
    statuses: BTreeSet<ExpenseStatus>,
    excluded_collectives: BTreeSet<i64>,
}

impl MetricFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `created_at` to the reporting window.
    #[must_use]
    pub fn with_time_window(self, window: ReportWindow) -> Self {
        self.within(window, TimeColumn::CreatedAt)
    }

    /// Constrain the given timestamp column to the reporting window.
    #[must_use]
    pub fn within(mut self, window: ReportWindow, column: TimeColumn) -> Self {
        self.windows
            .entry(column)
            .and_modify(|existing| *existing = existing.intersect(window))
            .or_insert(window);
        self
    }

    /// Require a status value; repeated calls widen the IN-list.
    #[must_use]
    pub fn with_status(mut self, status: ExpenseStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Keep only rows with a strictly positive amount.
    #[must_use]
    pub fn positive_amounts(mut self) -> Self {
        self.signs.insert(AmountSign::Positive);
        self
    }

    /// Keep only rows with a strictly negative amount.
    #[must_use]
    pub fn negative_amounts(mut self) -> Self {
        self.signs.insert(AmountSign::Negative);
        self
    }

    /// Exclude a collective id from the result set.
    #[must_use]
    pub fn excluding(mut self, collective_id: i64) -> Self {
        self.excluded_collectives.insert(collective_id);
        self
    }

    /// Conjunction of two filters. Set-valued constraints union; windows on
    /// the same column intersect. Idempotent and order-independent.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (column, window) in other.windows {
            self = self.within(window, column);
        }
        self.signs.extend(other.signs);
        self.statuses.extend(other.statuses);
        self.excluded_collectives.extend(other.excluded_collectives);
        self
    }

    /// Append the filter's predicates to a query that already carries a
    /// `WHERE 1=1` anchor. Constraint ordering is deterministic so the
    /// generated SQL text is stable.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, MySql>) {
        for (column, window) in &self.windows {
            qb.push(format!(" AND {} >= ", column.name()));
            qb.push_bind(window.lower_utc());
            qb.push(format!(" AND {} < ", column.name()));
            qb.push_bind(window.upper_utc());
        }

        for sign in &self.signs {
            match sign {
                AmountSign::Positive => qb.push(" AND amount > 0"),
                AmountSign::Negative => qb.push(" AND amount < 0"),
            };
        }

        if !self.statuses.is_empty() {
            qb.push(" AND status IN (");
            let mut separated = qb.separated(", ");
            for status in &self.statuses {
                separated.push_bind(status.as_str());
            }
            separated.push_unseparated(")");
        }

        if !self.excluded_collectives.is_empty() {
            qb.push(" AND collective_id NOT IN (");
            let mut separated = qb.separated(", ");
            for id in &self.excluded_collectives {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }
    }

    /// SQL text of the predicates alone, for tests and debug logging.
    pub fn predicates_sql(&self) -> String {
        let mut qb = QueryBuilder::new("");
        self.push_predicates(&mut qb);
        qb.sql().to_string()
    }
}
