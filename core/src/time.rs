use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use anyhow::{anyhow, Result};

/// Anything that can be pinned to a day on the user's local calendar.
///
/// Time of day is dropped; UTC instants are converted to local time first so
/// that an entry logged at 23:30 local lands on the day the user saw.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl CalendarDay for DateTime<Local> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl CalendarDay for DateTime<Utc> {
    fn calendar_day(&self) -> NaiveDate {
        self.with_timezone(&Local).date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Days elapsed since 1970-01-01. Used as the stored key of a day.
pub fn day_to_epoch_days(day: NaiveDate) -> i64 {
    day.signed_duration_since(epoch()).num_days()
}

pub fn epoch_days_to_day(days: i64) -> Option<NaiveDate> {
    let offset = Duration::try_days(days)?;
    epoch().checked_add_signed(offset)
}

fn epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

/// Parses the day formats accepted on the command line, relative to `today`.
///
/// `today`/`tod`, `yesterday`/`yes`, `-Nd`, `-Nw` and `YYYY-MM-DD`.
pub fn parse_human_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // Relative format (-Nd, -Nw), always into the past
    if let Some(rest) = input.strip_prefix('-') {
        let unit_at = rest
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| anyhow!("Invalid relative format: {}", input))?;
        let (num_str, unit) = rest.split_at(unit_at);
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        let back = match unit {
            "d" => Duration::try_days(count),
            "w" => Duration::try_weeks(count),
            _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
        };
        return back
            .and_then(|back| today.checked_sub_signed(back))
            .ok_or_else(|| anyhow!("Relative date out of range: {}", input));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}
