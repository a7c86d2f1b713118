use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Timelike};

use crate::models::{PlannedClosure, RestrictionSet, Role, Slot};
use crate::services::Denial;

/// Everything the admissibility check consults besides the slot itself.
/// All of it is an immutable snapshot for the duration of one toggle.
pub struct AdmissionContext<'a> {
    pub role: Role,
    pub restrictions: &'a RestrictionSet,
    pub planned_closures: &'a [PlannedClosure],
    /// Coordinate key ("{day label}|{time label}") -> workshop name, for
    /// slots held by workshops that are not flagged on the slot itself.
    pub workshop_slots: &'a HashMap<String, String>,
    /// Occurrence ids of the workshop currently being edited; its own
    /// slots stay selectable.
    pub current_workshop_occurrences: &'a HashSet<String>,
    /// Name of the workshop currently being edited, for map entries that
    /// carry no occurrence id on the slot itself.
    pub current_workshop_name: Option<&'a str>,
}

/// Coordinate key into the workshop-slots map.
pub fn coord_key(day_label: &str, time_label: &str) -> String {
    format!("{day_label}|{time_label}")
}

/// Pure admissibility predicate, quota aside.
///
/// Checks run in priority order and the first failure is reported: past
/// time, member open hours, guest blocked hours, planned closures,
/// workshop reservations, existing bookings. `start` must come from
/// `calendar::resolve_slot_start` and `weekday` from the day label's
/// abbreviation (`calendar::parse_day_label`), so that every check sees
/// the same coordinates.
pub fn check_admission(
    slot: &Slot,
    start: NaiveDateTime,
    weekday: &str,
    coord: &str,
    ctx: &AdmissionContext<'_>,
    now: NaiveDateTime,
) -> Result<(), Denial> {
    let hour = start.hour();

    if start < now {
        return Err(Denial::PastSlot);
    }

    if ctx.role == Role::Member {
        if let RestrictionSet::OpenHours { by_weekday } = ctx.restrictions {
            if let Some(hours) = by_weekday.get(weekday) {
                if hours.closed || hour < hours.start_hour || hour >= hours.end_hour {
                    return Err(Denial::AdminRestricted);
                }
            }
        }
    }

    if ctx.role == Role::Guest {
        if let RestrictionSet::BlockedHours {
            start_hour,
            end_hour,
        } = ctx.restrictions
        {
            // {0, 0} means no restriction; start > end wraps past midnight
            if !(*start_hour == 0 && *end_hour == 0) {
                let blocked = if start_hour > end_hour {
                    hour >= *start_hour || hour < *end_hour
                } else {
                    hour >= *start_hour && hour < *end_hour
                };
                if blocked {
                    return Err(Denial::AdminRestricted);
                }
            }
        }
    }

    if ctx.role == Role::Member {
        if let Some(closure) = ctx.planned_closures.iter().find(|c| c.contains(start)) {
            return Err(Denial::PlannedClosure {
                start: closure.start_date.date(),
                end: closure.end_date.date(),
            });
        }
    }

    let mapped_workshop = ctx.workshop_slots.get(coord);
    if slot.reserved_for_workshop || mapped_workshop.is_some() {
        let is_current = slot
            .workshop_occurrence_id
            .as_ref()
            .is_some_and(|id| ctx.current_workshop_occurrences.contains(id))
            || (mapped_workshop.is_some()
                && mapped_workshop.map(String::as_str) == ctx.current_workshop_name);
        if !is_current {
            return Err(Denial::ReservedForOtherWorkshop {
                workshop_name: slot
                    .workshop_name
                    .clone()
                    .or_else(|| mapped_workshop.cloned()),
            });
        }
    }

    if slot.is_booked {
        return Err(Denial::AlreadyBooked {
            by_me: slot.booked_by_me,
        });
    }

    Ok(())
}
