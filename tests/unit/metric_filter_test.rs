// Merge algebra of the typed query filter: conjunction only, idempotent,
// order-independent, and no constraint from either side is ever dropped.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use weeklydigest::core::ReportWindow;
use weeklydigest::reports::models::metric_filter::{ExpenseStatus, MetricFilter, TimeColumn};

fn week(index: i64) -> ReportWindow {
    let reference = Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap() + Duration::weeks(index);
    ReportWindow::containing(reference)
}

#[derive(Debug, Clone)]
struct FilterParts {
    created_week: Option<i64>,
    updated_week: Option<i64>,
    statuses: Vec<ExpenseStatus>,
    positive: bool,
    negative: bool,
    exclusions: Vec<i64>,
}

impl FilterParts {
    fn build(&self) -> MetricFilter {
        let mut filter = MetricFilter::new();
        if let Some(index) = self.created_week {
            filter = filter.within(week(index), TimeColumn::CreatedAt);
        }
        if let Some(index) = self.updated_week {
            filter = filter.within(week(index), TimeColumn::UpdatedAt);
        }
        for status in &self.statuses {
            filter = filter.with_status(*status);
        }
        if self.positive {
            filter = filter.positive_amounts();
        }
        if self.negative {
            filter = filter.negative_amounts();
        }
        for id in &self.exclusions {
            filter = filter.excluding(*id);
        }
        filter
    }
}

fn arb_parts() -> impl Strategy<Value = FilterParts> {
    (
        proptest::option::of(0i64..4),
        proptest::option::of(0i64..4),
        proptest::sample::subsequence(
            vec![
                ExpenseStatus::Pending,
                ExpenseStatus::Approved,
                ExpenseStatus::Paid,
            ],
            0..=3,
        ),
        any::<bool>(),
        any::<bool>(),
        proptest::collection::vec(0i64..10, 0..4),
    )
        .prop_map(
            |(created_week, updated_week, statuses, positive, negative, exclusions)| FilterParts {
                created_week,
                updated_week,
                statuses,
                positive,
                negative,
                exclusions,
            },
        )
}

proptest! {
    #[test]
    fn merge_is_idempotent(parts in arb_parts()) {
        let filter = parts.build();
        prop_assert_eq!(filter.clone().merge(filter.clone()), filter);
    }

    #[test]
    fn merge_is_order_independent(a in arb_parts(), b in arb_parts()) {
        let left = a.build().merge(b.build());
        let right = b.build().merge(a.build());
        prop_assert_eq!(left, right);
    }

    #[test]
    fn merge_never_drops_a_constraint(a in arb_parts(), b in arb_parts()) {
        let merged_sql = a.build().merge(b.build()).predicates_sql();

        for parts in [&a, &b] {
            if parts.created_week.is_some() {
                prop_assert!(merged_sql.contains("created_at >="));
            }
            if parts.updated_week.is_some() {
                prop_assert!(merged_sql.contains("updated_at >="));
            }
            if !parts.statuses.is_empty() {
                prop_assert!(merged_sql.contains("status IN ("));
            }
            if parts.positive {
                prop_assert!(merged_sql.contains("amount > 0"));
            }
            if parts.negative {
                prop_assert!(merged_sql.contains("amount < 0"));
            }
            if !parts.exclusions.is_empty() {
                prop_assert!(merged_sql.contains("collective_id NOT IN ("));
            }
        }
    }

    #[test]
    fn applying_the_same_combinators_twice_changes_nothing(parts in arb_parts()) {
        let once = parts.build();
        // Re-run every combinator on the already-built filter
        let mut twice = once.clone();
        if let Some(index) = parts.created_week {
            twice = twice.within(week(index), TimeColumn::CreatedAt);
        }
        if let Some(index) = parts.updated_week {
            twice = twice.within(week(index), TimeColumn::UpdatedAt);
        }
        for status in &parts.statuses {
            twice = twice.with_status(*status);
        }
        for id in &parts.exclusions {
            twice = twice.excluding(*id);
        }
        prop_assert_eq!(twice, once);
    }
}

#[test]
fn overlapping_windows_intersect_to_the_narrower_interval() {
    let early = week(0);
    let late = week(1);

    let merged = MetricFilter::new()
        .with_time_window(early)
        .merge(MetricFilter::new().with_time_window(late));

    let expected = MetricFilter::new().with_time_window(early.intersect(late));
    assert_eq!(merged, expected);
}
