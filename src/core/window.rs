use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Utc, Weekday};

/// Reporting timezone: the operator's home offset (UTC-05:00).
/// All window boundaries are anchored to this offset, never to the zone of
/// the reference instant.
pub fn report_offset() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).expect("valid offset")
}

/// Hour-of-day at which a reporting week begins, in the report timezone.
pub const WEEK_START_HOUR: u32 = 6;

/// Schedule gate for the weekly digest. In production only Monday runs go
/// out unless the manual-run override is set. The decision keys off the
/// actual current instant; the reporting-window anchor plays no part, so a
/// backfill run on a Monday always goes out regardless of the anchor's
/// weekday.
pub fn should_skip_run(now: DateTime<Utc>, is_production: bool, manual_run: bool) -> bool {
    is_production
        && !manual_run
        && now.with_timezone(&report_offset()).weekday() != Weekday::Mon
}

/// Half-open reporting interval `[last_week_start, this_week_start)`.
///
/// `this_week_start` is the start of the ISO week containing the reference
/// instant (Monday, 06:00, report timezone); `last_week_start` is exactly one
/// week earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub last_week_start: DateTime<FixedOffset>,
    pub this_week_start: DateTime<FixedOffset>,
}

impl ReportWindow {
    /// Compute the reporting window for the week containing `reference`.
    ///
    /// The reference instant may carry any timezone; it is converted to the
    /// report offset before the week is snapped, so the same instant always
    /// produces the same window.
    pub fn containing(reference: DateTime<Utc>) -> Self {
        let offset = report_offset();
        let local = reference.with_timezone(&offset);

        let days_from_monday = local.weekday().num_days_from_monday() as i64;
        let monday = local.date_naive() - Duration::days(days_from_monday);
        let week_start = monday
            .and_hms_opt(WEEK_START_HOUR, 0, 0)
            .expect("valid time of day");

        let this_week_start = offset
            .from_local_datetime(&week_start)
            .single()
            .expect("fixed offsets are unambiguous");

        Self {
            last_week_start: this_week_start - Duration::weeks(1),
            this_week_start,
        }
    }

    /// Lower bound as a naive UTC timestamp, for binding against DATETIME
    /// columns stored in UTC.
    pub fn lower_utc(&self) -> chrono::NaiveDateTime {
        self.last_week_start.with_timezone(&Utc).naive_utc()
    }

    /// Upper bound as a naive UTC timestamp (exclusive).
    pub fn upper_utc(&self) -> chrono::NaiveDateTime {
        self.this_week_start.with_timezone(&Utc).naive_utc()
    }

    /// Intersection of two windows: the later lower bound and the earlier
    /// upper bound. Used when merging filters that each carry a window.
    pub fn intersect(self, other: Self) -> Self {
        Self {
            last_week_start: self.last_week_start.max(other.last_week_start),
            this_week_start: self.this_week_start.min(other.this_week_start),
        }
    }
}
