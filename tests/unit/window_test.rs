// Reporting-window properties: for any reference instant the window is one
// week wide and anchored to Monday at the fixed hour in the report timezone.

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc, Weekday};
use proptest::prelude::*;
use weeklydigest::core::window::{report_offset, should_skip_run, ReportWindow, WEEK_START_HOUR};

proptest! {
    #[test]
    fn window_is_always_one_week_wide(secs in 0i64..4_000_000_000) {
        let reference = Utc.timestamp_opt(secs, 0).unwrap();
        let window = ReportWindow::containing(reference);

        prop_assert_eq!(
            window.this_week_start - window.last_week_start,
            Duration::weeks(1)
        );
    }

    #[test]
    fn window_starts_monday_at_fixed_hour(secs in 0i64..4_000_000_000) {
        let reference = Utc.timestamp_opt(secs, 0).unwrap();
        let window = ReportWindow::containing(reference);

        prop_assert_eq!(window.this_week_start.weekday(), Weekday::Mon);
        prop_assert_eq!(window.this_week_start.hour(), WEEK_START_HOUR);
        prop_assert_eq!(window.this_week_start.minute(), 0);
        prop_assert_eq!(window.this_week_start.offset(), &report_offset());
    }

    #[test]
    fn reference_zone_never_changes_the_window(
        secs in 0i64..4_000_000_000,
        offset_hours in -12i32..=12,
    ) {
        let reference = Utc.timestamp_opt(secs, 0).unwrap();
        let zone = chrono::FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let rezoned = reference.with_timezone(&zone).with_timezone(&Utc);

        prop_assert_eq!(
            ReportWindow::containing(reference),
            ReportWindow::containing(rezoned)
        );
    }
}

#[test]
fn schedule_gate_ignores_the_window_anchor() {
    // Backfilling on a Monday with a mid-week anchor must still go out:
    // the gate keys off the current day while the window derives from the
    // anchor alone.
    let monday_now = Utc.with_ymd_and_hms(2025, 11, 10, 14, 0, 0).unwrap();
    let midweek_anchor = Utc.with_ymd_and_hms(2025, 11, 6, 12, 0, 0).unwrap();

    assert!(!should_skip_run(monday_now, true, false));
    let window = ReportWindow::containing(midweek_anchor);
    assert_eq!(window.this_week_start.date_naive().to_string(), "2025-11-03");

    // Conversely, a Thursday run is skipped even when the anchor falls on
    // a Monday.
    let thursday_now = Utc.with_ymd_and_hms(2025, 11, 6, 14, 0, 0).unwrap();
    assert!(should_skip_run(thursday_now, true, false));
    assert!(!should_skip_run(thursday_now, true, true));
}

#[test]
fn window_bounds_convert_to_utc_for_binding() {
    let reference = Utc.with_ymd_and_hms(2025, 11, 6, 12, 0, 0).unwrap();
    let window = ReportWindow::containing(reference);

    // Monday 06:00 at UTC-05:00 is 11:00 UTC
    assert_eq!(window.upper_utc().to_string(), "2025-11-03 11:00:00");
    assert_eq!(window.lower_utc().to_string(), "2025-10-27 11:00:00");
}
