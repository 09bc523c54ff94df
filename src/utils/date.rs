//! Date utilities: the clock capability, ISO-8601 parsing and the
//! placeholder-date normalizer used to order and label shifts.

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
};
use std::sync::{Arc, Mutex};

/// Year the upstream feed uses for "time only" values.
pub const PLACEHOLDER_YEAR: i32 = 1970;

/// Source of the current instant. Everything that depends on "now" or
/// "today" takes a clock so tests can pin the calendar day.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Clock pinned to a local wall-clock time. Falls back to the next
    /// representable instant when the time falls in a DST gap.
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(local_from_naive(date.and_time(time)).unwrap_or_else(Local::now))
    }

    pub fn set(&self, now: DateTime<Local>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += delta;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Format used as the day suffix of persisted storage keys.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Resolve a local wall-clock time. Ambiguous times take the earlier
/// instant; times skipped by a DST jump move forward one hour.
pub fn local_from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
        })
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset or `Z`, compact offsets such as `+0530`
/// or `+05`, local date-times without an
/// offset (with or without seconds/fractions) and bare dates (local
/// midnight). Returns `None` for anything else.
pub fn parse_iso(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    // Offsets without a colon (`+0530`) or without minutes (`+05`).
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Local));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(naive);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| local_from_naive(d.and_time(NaiveTime::MIN)))
}

/// Normalize a shift timestamp.
///
/// A value whose local year is the 1970 placeholder keeps its local
/// time-of-day (down to the millisecond) and is moved onto `clock.today()`.
/// Other valid values are returned untouched; unparseable input yields
/// `None` and callers decide how to show or order it.
pub fn normalize_shift_date<C: Clock>(date_string: &str, clock: &C) -> Option<DateTime<Local>> {
    let parsed = parse_iso(date_string)?;

    if parsed.year() != PLACEHOLDER_YEAR {
        return Some(parsed);
    }

    let rebased = clock.today().and_time(parsed.time());
    Some(local_from_naive(rebased).unwrap_or(parsed))
}

/// Ordering key for shifts: milliseconds since the epoch, with invalid
/// dates sorted as the epoch itself.
pub fn shift_sort_key<C: Clock>(date_string: &str, clock: &C) -> i64 {
    normalize_shift_date(date_string, clock)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn clock() -> FixedClock {
        FixedClock::at(
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn placeholder_dates_move_to_today_keeping_time() {
        let input = "1970-01-01T13:45:00.000Z";
        let original = parse_iso(input).unwrap();
        if original.year() != PLACEHOLDER_YEAR {
            // Far west of UTC the local year is 1969; nothing to rebase.
            return;
        }

        let clock = clock();
        let normalized = normalize_shift_date(input, &clock).unwrap();

        assert_eq!(normalized.date_naive(), clock.today());
        assert_eq!(normalized.hour(), original.hour());
        assert_eq!(normalized.minute(), original.minute());
        assert_eq!(normalized.second(), original.second());
    }

    #[test]
    fn local_placeholder_without_offset_is_rebased() {
        let clock = clock();
        let normalized = normalize_shift_date("1970-01-01T21:30:15.250", &clock).unwrap();

        assert_eq!(normalized.date_naive(), clock.today());
        assert_eq!(normalized.hour(), 21);
        assert_eq!(normalized.minute(), 30);
        assert_eq!(normalized.second(), 15);
        assert_eq!(normalized.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn real_dates_are_returned_untouched() {
        let input = "2024-12-25T10:30:00.000Z";
        let normalized = normalize_shift_date(input, &clock()).unwrap();
        let original = DateTime::parse_from_rfc3339(input).unwrap();

        assert_eq!(normalized.timestamp_millis(), original.timestamp_millis());
    }

    #[test]
    fn rebasing_follows_the_clock() {
        let clock = clock();
        let first = normalize_shift_date("1970-01-01T09:00:00", &clock).unwrap();
        clock.advance(TimeDelta::days(1));
        let second = normalize_shift_date("1970-01-01T09:00:00", &clock).unwrap();

        assert_eq!(second.date_naive(), first.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn invalid_input_yields_none_and_sorts_as_epoch() {
        assert!(normalize_shift_date("not a date", &clock()).is_none());
        assert!(normalize_shift_date("", &clock()).is_none());
        assert_eq!(shift_sort_key("garbage", &clock()), 0);
    }

    #[test]
    fn compact_offsets_are_accepted() {
        let expected = DateTime::parse_from_rfc3339("2026-03-10T09:00:00+05:30").unwrap();
        let compact = parse_iso("2026-03-10T09:00:00+0530").unwrap();
        assert_eq!(compact.timestamp_millis(), expected.timestamp_millis());

        let hours_only = parse_iso("2026-03-10T09:00:00.250+05").unwrap();
        let expected = DateTime::parse_from_rfc3339("2026-03-10T09:00:00.250+05:00").unwrap();
        assert_eq!(hours_only.timestamp_millis(), expected.timestamp_millis());

        let short = parse_iso("2026-03-10T09:00-0300").unwrap();
        let expected = DateTime::parse_from_rfc3339("2026-03-10T09:00:00-03:00").unwrap();
        assert_eq!(short.timestamp_millis(), expected.timestamp_millis());
    }

    #[test]
    fn bare_dates_parse_as_local_midnight() {
        let parsed = parse_iso("2025-09-01").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn day_key_is_zero_padded() {
        assert_eq!(day_key(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()), "2026-01-05");
    }
}
