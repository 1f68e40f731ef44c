use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::reports::models::{CollectiveSummary, CurrencyTotal, MetricFilter};

/// Aggregation queries backing the weekly report.
///
/// Every method takes a [`MetricFilter`] built by the service layer; the
/// repository contributes only the table and the aggregate shape.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Count donation transactions matching the filter
    async fn count_donations(&self, filter: &MetricFilter) -> Result<i64>;

    /// Donation sums grouped by currency, ordered by currency code
    async fn donation_totals(&self, filter: &MetricFilter) -> Result<Vec<CurrencyTotal>>;

    /// Count expenses created in the window
    async fn count_new_expenses(&self, filter: &MetricFilter) -> Result<i64>;

    /// Count expenses paid in the window
    async fn count_paid_expenses(&self, filter: &MetricFilter) -> Result<i64>;

    /// Paid-expense sums grouped by currency (amounts stored negative)
    async fn paid_expense_totals(&self, filter: &MetricFilter) -> Result<Vec<CurrencyTotal>>;

    /// Count collectives created in the window
    async fn count_new_collectives(&self, filter: &MetricFilter) -> Result<i64>;

    /// Slug and tags of collectives created in the window, ordered by slug
    async fn list_new_collectives(&self, filter: &MetricFilter) -> Result<Vec<CollectiveSummary>>;

    /// Distinct collective ids with a transaction in the window
    async fn active_collectives_in_transactions(&self, filter: &MetricFilter) -> Result<Vec<i64>>;

    /// Distinct collective ids with an expense in the window
    async fn active_collectives_in_expenses(&self, filter: &MetricFilter) -> Result<Vec<i64>>;
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &str, filter: &MetricFilter) -> Result<i64> {
        let mut qb = count_query(table, filter);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn totals(&self, table: &str, filter: &MetricFilter) -> Result<Vec<CurrencyTotal>> {
        let mut qb = totals_query(table, filter);
        let totals: Vec<CurrencyTotal> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(totals)
    }

    async fn distinct_collectives(&self, table: &str, filter: &MetricFilter) -> Result<Vec<i64>> {
        let mut qb = distinct_collectives_query(table, filter);
        let ids: Vec<i64> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(ids)
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn count_donations(&self, filter: &MetricFilter) -> Result<i64> {
        self.count("transactions", filter).await
    }

    async fn donation_totals(&self, filter: &MetricFilter) -> Result<Vec<CurrencyTotal>> {
        self.totals("transactions", filter).await
    }

    async fn count_new_expenses(&self, filter: &MetricFilter) -> Result<i64> {
        self.count("expenses", filter).await
    }

    async fn count_paid_expenses(&self, filter: &MetricFilter) -> Result<i64> {
        self.count("expenses", filter).await
    }

    async fn paid_expense_totals(&self, filter: &MetricFilter) -> Result<Vec<CurrencyTotal>> {
        self.totals("expenses", filter).await
    }

    async fn count_new_collectives(&self, filter: &MetricFilter) -> Result<i64> {
        self.count("collectives", filter).await
    }

    async fn list_new_collectives(&self, filter: &MetricFilter) -> Result<Vec<CollectiveSummary>> {
        let mut qb = new_collectives_query(filter);
        let rows: Vec<(String, Option<String>)> =
            qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(slug, tags)| CollectiveSummary {
                slug,
                tags: split_tags(tags.as_deref()),
            })
            .collect())
    }

    async fn active_collectives_in_transactions(&self, filter: &MetricFilter) -> Result<Vec<i64>> {
        self.distinct_collectives("transactions", filter).await
    }

    async fn active_collectives_in_expenses(&self, filter: &MetricFilter) -> Result<Vec<i64>> {
        self.distinct_collectives("expenses", filter).await
    }
}

fn count_query(table: &str, filter: &MetricFilter) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE 1=1", table));
    filter.push_predicates(&mut qb);
    qb
}

fn totals_query(table: &str, filter: &MetricFilter) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT currency, CAST(COALESCE(SUM(amount), 0) AS SIGNED) AS total FROM {} WHERE 1=1",
        table
    ));
    filter.push_predicates(&mut qb);
    qb.push(" GROUP BY currency ORDER BY currency");
    qb
}

fn distinct_collectives_query(table: &str, filter: &MetricFilter) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT DISTINCT collective_id FROM {} WHERE 1=1",
        table
    ));
    filter.push_predicates(&mut qb);
    qb
}

fn new_collectives_query(filter: &MetricFilter) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT slug, tags FROM collectives WHERE 1=1");
    filter.push_predicates(&mut qb);
    qb.push(" ORDER BY slug");
    qb
}

/// The ledger stores tags as a comma-separated text column.
fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
