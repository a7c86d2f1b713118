pub mod calendar;
pub mod quota;
pub mod restrictions;
pub mod session;

use chrono::NaiveDate;

/// Why a toggle-on was refused. Denials are ordinary values surfaced as
/// user-facing messages, never errors; only malformed coordinates escalate
/// to a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Denial {
    PastSlot,
    AdminRestricted,
    PlannedClosure {
        start: NaiveDate,
        end: NaiveDate,
    },
    ReservedForOtherWorkshop {
        workshop_name: Option<String>,
    },
    AlreadyBooked {
        by_me: bool,
    },
    DailyQuotaExceeded {
        day: NaiveDate,
        max_per_day: u32,
    },
    WeeklyQuotaExceeded {
        window_start: NaiveDate,
        window_end: NaiveDate,
        count: u32,
        max_per_week: u32,
    },
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::PastSlot => {
                write!(f, "That time slot is in the past.")
            }
            Denial::AdminRestricted => {
                write!(f, "That time is outside the bookable hours for your membership.")
            }
            Denial::PlannedClosure { start, end } => {
                write!(f, "The space is closed from {start} to {end} (planned closure).")
            }
            Denial::ReservedForOtherWorkshop { workshop_name } => match workshop_name {
                Some(name) => write!(f, "That slot is reserved for the workshop \"{name}\"."),
                None => write!(f, "That slot is reserved for a workshop."),
            },
            Denial::AlreadyBooked { by_me: true } => {
                write!(f, "You have already booked that slot.")
            }
            Denial::AlreadyBooked { by_me: false } => {
                write!(f, "That slot is already booked by someone else.")
            }
            Denial::DailyQuotaExceeded { day, max_per_day } => {
                if *max_per_day == 0 {
                    write!(f, "Bookings are disabled: 0 slots allowed per day.")
                } else {
                    write!(
                        f,
                        "Daily booking limit reached for {day}: at most {} ({max_per_day} slots) per day.",
                        slot_hours(*max_per_day)
                    )
                }
            }
            Denial::WeeklyQuotaExceeded {
                window_start,
                window_end,
                count,
                max_per_week,
            } => {
                if *max_per_week == 0 {
                    write!(f, "Bookings are disabled: 0 slots allowed per week.")
                } else {
                    write!(
                        f,
                        "Weekly booking limit exceeded: {count} slots between {window_start} and {window_end} (at most {max_per_week} per 7 days)."
                    )
                }
            }
        }
    }
}

/// Render a slot count as booked time, e.g. 4 slots -> "2 hours".
fn slot_hours(slots: u32) -> String {
    let minutes = slots * 30;
    if minutes % 60 == 0 {
        let hours = minutes / 60;
        if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        }
    } else {
        format!("{}.5 hours", minutes / 60)
    }
}
