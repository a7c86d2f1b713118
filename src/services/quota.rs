use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::services::Denial;

pub const DEFAULT_MAX_SLOTS_PER_DAY: u32 = 4;
pub const DEFAULT_MAX_SLOTS_PER_WEEK: u32 = 14;

#[derive(Debug, Clone, Copy)]
pub struct QuotaLimits {
    pub max_per_day: u32,
    pub max_per_week: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            max_per_day: DEFAULT_MAX_SLOTS_PER_DAY,
            max_per_week: DEFAULT_MAX_SLOTS_PER_WEEK,
        }
    }
}

/// Decide whether one more slot may be added.
///
/// `mine` is every slot the user already holds (committed bookings plus
/// in-session selections) as start instants; the candidate itself must not
/// be in it. Pure decision, no mutation.
///
/// The 7-day cap is deliberately not anchored to calendar weeks: a fixed
/// Mon-Sun boundary would let heavy booking straddle the seam. Every day
/// with any of the user's activity is tried as a window start, as is the
/// candidate's own day and each of the 7 days before the earliest visible
/// grid day (windows that began before the grid are still live). If any
/// window [D, D+7) containing the candidate would exceed the cap, the add
/// is refused and that window is reported.
pub fn can_add(
    candidate: NaiveDateTime,
    mine: &[NaiveDateTime],
    limits: &QuotaLimits,
    earliest_visible_day: NaiveDate,
) -> Result<(), Denial> {
    let candidate_day = candidate.date();

    let same_day = mine.iter().filter(|t| t.date() == candidate_day).count() as u32;
    if same_day + 1 > limits.max_per_day {
        return Err(Denial::DailyQuotaExceeded {
            day: candidate_day,
            max_per_day: limits.max_per_day,
        });
    }

    // BTreeSet so the earliest offending window is the one reported
    let mut anchors: BTreeSet<NaiveDate> = mine.iter().map(|t| t.date()).collect();
    anchors.insert(candidate_day);
    for back in 1..=7 {
        anchors.insert(earliest_visible_day - Duration::days(back));
    }

    for anchor in anchors {
        let window_end = anchor + Duration::days(7);
        if candidate_day < anchor || candidate_day >= window_end {
            continue;
        }
        let in_window = mine
            .iter()
            .filter(|t| t.date() >= anchor && t.date() < window_end)
            .count() as u32
            + 1;
        if in_window > limits.max_per_week {
            return Err(Denial::WeeklyQuotaExceeded {
                window_start: anchor,
                window_end,
                count: in_window,
                max_per_week: limits.max_per_week,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// n half-hour slots on one day, starting 09:00.
    fn slots_on(day: &str, n: u32) -> Vec<NaiveDateTime> {
        let base = dt(&format!("{day} 09:00"));
        (0..n)
            .map(|i| base + Duration::minutes(30 * i as i64))
            .collect()
    }

    #[test]
    fn test_first_slot_always_fits_default_limits() {
        let result = can_add(dt("2025-06-16 09:00"), &[], &QuotaLimits::default(), date("2025-06-16"));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_daily_cap_rejects_fifth_slot() {
        let mine = slots_on("2025-06-16", 4);
        let result = can_add(
            dt("2025-06-16 14:00"),
            &mine,
            &QuotaLimits::default(),
            date("2025-06-16"),
        );
        assert_eq!(
            result,
            Err(Denial::DailyQuotaExceeded {
                day: date("2025-06-16"),
                max_per_day: 4,
            })
        );
    }

    #[test]
    fn test_daily_cap_counts_only_same_day() {
        let mut mine = slots_on("2025-06-16", 4);
        mine.extend(slots_on("2025-06-17", 4));
        // a different day is unaffected by the other days' counts
        let result = can_add(
            dt("2025-06-18 09:00"),
            &mine,
            &QuotaLimits::default(),
            date("2025-06-16"),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_weekly_cap_across_calendar_week_seam() {
        // 10 committed slots Thu 19 - Sat 21 (week one)
        let mut mine = slots_on("2025-06-19", 4);
        mine.extend(slots_on("2025-06-20", 4));
        mine.extend(slots_on("2025-06-21", 2));

        let limits = QuotaLimits::default();
        let earliest = date("2025-06-19");

        // 4 more on Sun 22 - Mon 23 (week two) bring the Thu-anchored
        // window to exactly 14
        for extra in [
            "2025-06-22 09:00",
            "2025-06-22 09:30",
            "2025-06-23 09:00",
            "2025-06-23 09:30",
        ] {
            assert_eq!(can_add(dt(extra), &mine, &limits, earliest), Ok(()));
            mine.push(dt(extra));
        }

        // the 15th slot within 7 days of Thu 19 must be refused even
        // though Tue 24 is in a different fixed calendar week; the
        // earliest anchor whose window holds the candidate is Wed 18
        // (one day before the grid opens)
        let result = can_add(dt("2025-06-24 09:00"), &mine, &limits, earliest);
        assert_eq!(
            result,
            Err(Denial::WeeklyQuotaExceeded {
                window_start: date("2025-06-18"),
                window_end: date("2025-06-25"),
                count: 15,
                max_per_week: 14,
            })
        );
    }

    #[test]
    fn test_weekly_cap_window_before_visible_grid() {
        // committed activity entirely before the visible grid starts; the
        // window anchored at that activity still constrains new slots
        let mut mine = Vec::new();
        for day in ["2025-06-14", "2025-06-15", "2025-06-16"] {
            mine.extend(slots_on(day, 4));
        }
        let limits = QuotaLimits::default();
        // grid opens Mon 16; windows that began up to 7 days earlier apply
        let earliest = date("2025-06-16");

        // [Sat 14, Sat 21) already holds 12; two more fit
        assert_eq!(can_add(dt("2025-06-18 09:00"), &mine, &limits, earliest), Ok(()));
        mine.push(dt("2025-06-18 09:00"));
        assert_eq!(can_add(dt("2025-06-18 09:30"), &mine, &limits, earliest), Ok(()));
        mine.push(dt("2025-06-18 09:30"));

        // the earliest anchor whose window still reaches Wed 18 is Thu 12
        let result = can_add(dt("2025-06-18 10:00"), &mine, &limits, earliest);
        assert_eq!(
            result,
            Err(Denial::WeeklyQuotaExceeded {
                window_start: date("2025-06-12"),
                window_end: date("2025-06-19"),
                count: 15,
                max_per_week: 14,
            })
        );
    }

    #[test]
    fn test_committed_only_slots_still_count() {
        // no in-session selections; committed bookings alone fill the week
        let mut mine = Vec::new();
        for day in [
            "2025-06-16",
            "2025-06-17",
            "2025-06-18",
            "2025-06-19",
        ] {
            mine.extend(slots_on(day, 4));
        }
        // 16 committed slots in [Mon 16, Mon 23): over the cap already
        let result = can_add(
            dt("2025-06-20 09:00"),
            &mine,
            &QuotaLimits::default(),
            date("2025-06-16"),
        );
        assert!(matches!(result, Err(Denial::WeeklyQuotaExceeded { .. })));
    }

    #[test]
    fn test_slot_outside_every_loaded_window_is_allowed() {
        // activity more than 7 days before the candidate constrains nothing
        let mine = slots_on("2025-06-10", 4);
        let result = can_add(
            dt("2025-06-20 09:00"),
            &mine,
            &QuotaLimits::default(),
            date("2025-06-16"),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_zero_daily_cap_rejects_everything() {
        let limits = QuotaLimits { max_per_day: 0, max_per_week: 14 };
        let result = can_add(dt("2025-06-16 09:00"), &[], &limits, date("2025-06-16"));
        let denial = result.unwrap_err();
        assert!(matches!(denial, Denial::DailyQuotaExceeded { max_per_day: 0, .. }));
        assert!(denial.to_string().contains("0 slots allowed"));
    }

    #[test]
    fn test_zero_weekly_cap_rejects_everything() {
        let limits = QuotaLimits { max_per_day: 4, max_per_week: 0 };
        let result = can_add(dt("2025-06-16 09:00"), &[], &limits, date("2025-06-16"));
        let denial = result.unwrap_err();
        assert!(matches!(denial, Denial::WeeklyQuotaExceeded { max_per_week: 0, .. }));
        assert!(denial.to_string().contains("0 slots allowed"));
    }
}
