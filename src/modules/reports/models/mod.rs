pub mod metric_filter;
pub mod weekly_report;

pub use metric_filter::{AmountSign, ExpenseStatus, MetricFilter, TimeColumn};
pub use weekly_report::{CollectiveSummary, CurrencyTotal, ReportWindowDates, WeeklyReport};
