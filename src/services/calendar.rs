use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Every bookable slot is a fixed half-hour.
pub const SLOT_MINUTES: i64 = 30;

/// A label pair could not be turned into a real date/time. This always
/// signals a grid-generation bug upstream, never bad user input, so it
/// fails loudly instead of degrading into an invalid date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("malformed day label: {0:?}")]
    MalformedDayLabel(String),

    #[error("malformed time label: {0:?}")]
    MalformedTimeLabel(String),

    #[error("no such calendar date: {0}-{1:02}-{2:02}")]
    InvalidDate(i32, u32, u32),
}

const WEEKDAYS: [(&str, &str); 7] = [
    ("Mon", "Monday"),
    ("Tue", "Tuesday"),
    ("Wed", "Wednesday"),
    ("Thu", "Thursday"),
    ("Fri", "Friday"),
    ("Sat", "Saturday"),
    ("Sun", "Sunday"),
];

/// Map a day label's weekday abbreviation to the full name used as the
/// open-hours lookup key.
pub fn weekday_name(abbrev: &str) -> Option<&'static str> {
    WEEKDAYS
        .iter()
        .find(|(short, _)| *short == abbrev)
        .map(|(_, full)| *full)
}

/// All half-hour marks in [start_hour, end_hour), formatted "HH:MM".
pub fn generate_time_labels(start_hour: u32, end_hour: u32) -> Vec<String> {
    let mut labels = Vec::new();
    for hour in start_hour..end_hour {
        labels.push(format!("{hour:02}:00"));
        labels.push(format!("{hour:02}:30"));
    }
    labels
}

/// `count` consecutive days starting at `today`, as "{abbrev} {day}".
pub fn generate_day_labels(today: NaiveDate, count: usize) -> Vec<String> {
    (0..count)
        .map(|offset| {
            let date = today + Duration::days(offset as i64);
            format!("{} {}", date.format("%a"), date.day())
        })
        .collect()
}

/// Presentation grouping into rows of `week_size` days.
pub fn partition_into_weeks(day_labels: &[String], week_size: usize) -> Vec<Vec<String>> {
    if week_size == 0 {
        return Vec::new();
    }
    day_labels
        .chunks(week_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Resolve a (day label, time label) cell to its absolute start instant.
///
/// Labels carry only a weekday abbreviation and a day-of-month, so the
/// month is disambiguated by the rollover rule: late in the month (today's
/// day-of-month > 20), a smaller day-of-month belongs to the following
/// month. Rolling past December carries into the next year.
///
/// This is the single source of truth for date resolution; restriction
/// and quota checks must go through it rather than re-deriving dates.
pub fn resolve_slot_start(
    day_label: &str,
    time_label: &str,
    today: NaiveDate,
) -> Result<NaiveDateTime, CoordinateError> {
    let (_, day_of_month) = parse_day_label(day_label)?;
    let (hour, minute) = parse_time_label(time_label)?;

    let (mut year, mut month) = (today.year(), today.month());
    if day_of_month < today.day() && today.day() > 20 {
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }

    let date = NaiveDate::from_ymd_opt(year, month, day_of_month)
        .ok_or(CoordinateError::InvalidDate(year, month, day_of_month))?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| CoordinateError::MalformedTimeLabel(time_label.to_string()))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Split "Thu 8" into the full weekday name and the day-of-month.
pub fn parse_day_label(day_label: &str) -> Result<(&'static str, u32), CoordinateError> {
    let malformed = || CoordinateError::MalformedDayLabel(day_label.to_string());

    let mut parts = day_label.split_whitespace();
    let abbrev = parts.next().ok_or_else(malformed)?;
    let day_part = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    let weekday = weekday_name(abbrev).ok_or_else(malformed)?;

    let day_of_month: u32 = day_part.parse().map_err(|_| malformed())?;
    if !(1..=31).contains(&day_of_month) {
        return Err(malformed());
    }

    Ok((weekday, day_of_month))
}

/// Split "HH:MM" into hour and minute.
pub fn parse_time_label(time_label: &str) -> Result<(u32, u32), CoordinateError> {
    let malformed = || CoordinateError::MalformedTimeLabel(time_label.to_string());

    let (hour_part, minute_part) = time_label.split_once(':').ok_or_else(malformed)?;
    let hour: u32 = hour_part.parse().map_err(|_| malformed())?;
    let minute: u32 = minute_part.parse().map_err(|_| malformed())?;
    if hour > 23 || minute > 59 {
        return Err(malformed());
    }

    Ok((hour, minute))
}
