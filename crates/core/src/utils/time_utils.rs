use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for day keys.
/// Transaction timestamps are reduced to calendar days in this zone unless the
/// settings name another one.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to its day key in the given timezone.
///
/// This is the single source of truth for turning a timestamp into the
/// calendar day used for aggregation and map lookups.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's day key in the given timezone.
pub fn valuation_date_today(tz: Tz) -> NaiveDate {
    valuation_date_from_utc(Utc::now(), tz)
}

/// Inclusive list of calendar days from `start` to `end`.
///
/// Days are produced by advancing the calendar date, never by adding a fixed
/// duration, so a DST transition cannot skip or repeat a day.
pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let capacity = (end - start).num_days() as usize + 1;
    let mut days = Vec::with_capacity(capacity);
    let mut current = start;
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}
