use super::SchedError;
use chrono::{Datelike, NaiveDate, Weekday};

/// Jours de `start` à `end` inclus, avec leur jour de semaine.
pub fn expand_dates(start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, Weekday)>, SchedError> {
    if end < start {
        return Err(SchedError::InvalidRange { start, end });
    }

    let mut out = Vec::with_capacity(days_between(start, end) as usize + 1);
    let mut current = start;
    loop {
        out.push((current, current.weekday()));
        if current == end {
            break;
        }
        current = current
            .succ_opt()
            .ok_or(SchedError::DateOverflow(current))?;
    }
    Ok(out)
}

/// Dimanche qui ouvre la semaine contenant `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub(super) fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}
