use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Admin,
    Staff,
    Member,
    Guest,
}

impl Role {
    pub fn as_code(&self) -> u8 {
        match self {
            Role::Admin => 1,
            Role::Staff => 2,
            Role::Member => 3,
            Role::Guest => 4,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Role::Admin),
            2 => Ok(Role::Staff),
            3 => Ok(Role::Member),
            4 => Ok(Role::Guest),
            _ => Err(format!("unknown role code: {code}")),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> u8 {
        role.as_code()
    }
}

/// Opening hours for one weekday, member (role 3) restrictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHours {
    pub start_hour: u32,
    pub end_hour: u32,
    #[serde(default)]
    pub closed: bool,
}

/// Per-role restriction source, read-only for the whole booking session.
///
/// Members are restricted by per-weekday open hours (keyed by full weekday
/// name, "Monday".."Sunday"); guests by a single daily blocked window that
/// may wrap past midnight. `{0, 0}` blocked hours mean "no restriction".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RestrictionSet {
    None,
    OpenHours { by_weekday: HashMap<String, DayHours> },
    BlockedHours { start_hour: u32, end_hour: u32 },
}

impl RestrictionSet {
    /// Overall visible hour range: earliest start and latest end across
    /// all non-closed weekdays. None when no open-hours restriction
    /// applies or every day is closed.
    pub fn visible_hours(&self) -> Option<(u32, u32)> {
        match self {
            RestrictionSet::OpenHours { by_weekday } => by_weekday
                .values()
                .filter(|h| !h.closed)
                .fold(None, |acc, h| match acc {
                    None => Some((h.start_hour, h.end_hour)),
                    Some((lo, hi)) => Some((lo.min(h.start_hour), hi.max(h.end_hour))),
                }),
            _ => None,
        }
    }
}

impl Default for RestrictionSet {
    fn default() -> Self {
        RestrictionSet::None
    }
}

/// An absolute closure interval, applied to members only.
/// Half-open: a slot starting exactly at `end_date` is bookable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedClosure {
    pub id: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl PlannedClosure {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant < self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::try_from(3u8).unwrap(), Role::Member);
        assert_eq!(u8::from(Role::Guest), 4);
        assert!(Role::try_from(7u8).is_err());
    }

    #[test]
    fn test_visible_hours_spans_open_days() {
        let mut by_weekday = HashMap::new();
        by_weekday.insert(
            "Monday".to_string(),
            DayHours { start_hour: 9, end_hour: 17, closed: false },
        );
        by_weekday.insert(
            "Tuesday".to_string(),
            DayHours { start_hour: 7, end_hour: 14, closed: false },
        );
        by_weekday.insert(
            "Sunday".to_string(),
            DayHours { start_hour: 0, end_hour: 23, closed: true },
        );
        let set = RestrictionSet::OpenHours { by_weekday };
        assert_eq!(set.visible_hours(), Some((7, 17)));
    }

    #[test]
    fn test_visible_hours_all_closed() {
        let mut by_weekday = HashMap::new();
        by_weekday.insert(
            "Monday".to_string(),
            DayHours { start_hour: 9, end_hour: 17, closed: true },
        );
        let set = RestrictionSet::OpenHours { by_weekday };
        assert_eq!(set.visible_hours(), None);
        assert_eq!(RestrictionSet::None.visible_hours(), None);
    }

    #[test]
    fn test_closure_half_open() {
        let closure = PlannedClosure {
            id: "c1".to_string(),
            start_date: dt("2024-06-10 00:00"),
            end_date: dt("2024-06-12 00:00"),
        };
        assert!(closure.contains(dt("2024-06-10 00:00")));
        assert!(closure.contains(dt("2024-06-11 23:30")));
        assert!(!closure.contains(dt("2024-06-12 00:00")));
        assert!(!closure.contains(dt("2024-06-09 23:30")));
    }
}
