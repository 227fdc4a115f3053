//! Worked-hours calculation engine.
//!
//! Pure functions over parsed clock times:
//! - Elapsed duration between clock-in and clock-out (overnight-aware)
//! - Aggregation of per-day durations into a card total

use crate::models::{InvalidTimeFormat, TimeOfDay, WorkDuration, MINUTES_PER_DAY};

/// Elapsed duration between two parsed times.
///
/// A clock-out at or before clock-in is an overnight shift: the clock-out
/// is pushed forward a full day, so equal times yield 24:00.
pub fn duration_between(time_in: TimeOfDay, time_out: TimeOfDay) -> WorkDuration {
    let start = time_in.minutes_since_midnight();
    let mut end = time_out.minutes_since_midnight();

    if end <= start {
        end += MINUTES_PER_DAY;
    }

    WorkDuration::from_minutes(end - start)
}

/// Parse both clock strings and compute the elapsed duration.
///
/// Either string failing to parse fails the whole computation.
pub fn hours_between(time_in: &str, time_out: &str) -> Result<WorkDuration, InvalidTimeFormat> {
    let t_in: TimeOfDay = time_in.parse()?;
    let t_out: TimeOfDay = time_out.parse()?;
    Ok(duration_between(t_in, t_out))
}

/// Sum a sequence of `"H:MM"` duration strings.
///
/// Unparseable entries are skipped, not errors: this is a best-effort
/// summary over values the calculator already produced. Empty or
/// all-invalid input sums to zero.
pub fn total_duration<'a, I>(durations: I) -> WorkDuration
where
    I: IntoIterator<Item = &'a str>,
{
    durations
        .into_iter()
        .filter_map(WorkDuration::parse_lenient)
        .sum()
}
