pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CollectiveSummary, CurrencyTotal, MetricFilter, TimeColumn, WeeklyReport};
pub use repositories::{MySqlReportRepository, ReportRepository};
pub use services::ReportService;
