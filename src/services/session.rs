use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{PlannedClosure, RestrictionSet, Role, SelectionEntry, Slot};
use crate::services::calendar::{parse_day_label, resolve_slot_start, CoordinateError};
use crate::services::quota::{self, QuotaLimits};
use crate::services::restrictions::{check_admission, coord_key, AdmissionContext};
use crate::services::Denial;

/// Read-only booking snapshot supplied by the persistence layer when a
/// session starts. The engine treats it as immutable; staleness is the
/// submission layer's problem, so approval here is advisory only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapshot {
    pub slots_by_day: HashMap<String, HashMap<String, Slot>>,
    pub role: Option<Role>,
    pub restrictions: RestrictionSet,
    pub planned_closures: Vec<PlannedClosure>,
    /// "{day label}|{time label}" -> workshop name.
    pub workshop_slots: HashMap<String, String>,
    pub current_workshop_id: Option<String>,
    pub current_workshop_name: Option<String>,
    pub current_workshop_occurrences: HashSet<String>,
    /// Start instants of the user's committed bookings.
    pub committed_slots: Vec<NaiveDateTime>,
    /// Canonical "startISO|endISO" keys to seed the selection with.
    pub preselected: Vec<String>,
    pub max_slots_per_day: Option<u32>,
    pub max_slots_per_week: Option<u32>,
}

/// Result of one toggle attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResult {
    /// Final state of the toggled cell.
    pub selected: bool,
    /// Full current selection, in insertion order.
    pub selection_keys: Vec<String>,
    /// Rejection message when the toggle-on was refused.
    pub message: Option<String>,
}

pub type SelectionListener = Box<dyn Fn(&[String]) + Send>;

/// Session-local toggle state machine over one grid snapshot.
///
/// Each cell is either selected or not; a toggle-on must pass the
/// restriction evaluator and then the quota tracker, a toggle-off always
/// succeeds. Exactly one rejection message is kept (last rejection wins)
/// and it clears on the next successful toggle.
pub struct BookingSession {
    snapshot: GridSnapshot,
    limits: QuotaLimits,
    /// "Today" captured at session start; all label resolution uses it.
    base_date: NaiveDate,
    selections: Vec<SelectionEntry>,
    message: Option<String>,
    on_selection_changed: Option<SelectionListener>,
}

impl BookingSession {
    pub fn new(snapshot: GridSnapshot, defaults: QuotaLimits, base_date: NaiveDate) -> anyhow::Result<Self> {
        let limits = QuotaLimits {
            max_per_day: snapshot.max_slots_per_day.unwrap_or(defaults.max_per_day),
            max_per_week: snapshot.max_slots_per_week.unwrap_or(defaults.max_per_week),
        };
        let selections = snapshot
            .preselected
            .iter()
            .map(|key| SelectionEntry::parse_key(key))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            snapshot,
            limits,
            base_date,
            selections,
            message: None,
            on_selection_changed: None,
        })
    }

    pub fn set_on_selection_changed(&mut self, listener: SelectionListener) {
        self.on_selection_changed = Some(listener);
    }

    pub fn selection_keys(&self) -> Vec<String> {
        self.selections.iter().map(SelectionEntry::key).collect()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn restrictions(&self) -> &RestrictionSet {
        &self.snapshot.restrictions
    }

    pub fn role(&self) -> Role {
        self.snapshot.role.unwrap_or(Role::Member)
    }

    /// Toggle one grid cell.
    ///
    /// Only malformed labels are hard errors; admission and quota
    /// rejections come back as the `message` on a `ToggleResult` with no
    /// state change.
    pub fn toggle(
        &mut self,
        day_label: &str,
        time_label: &str,
        now: NaiveDateTime,
    ) -> Result<ToggleResult, CoordinateError> {
        let start = resolve_slot_start(day_label, time_label, self.base_date)?;
        let (weekday, _) = parse_day_label(day_label)?;
        let entry = SelectionEntry::for_slot(start);

        // Toggle-off: always permitted, removing never violates a cap
        if self.selections.contains(&entry) {
            self.selections.retain(|e| e != &entry);
            self.message = None;
            self.notify();
            return Ok(self.result(false));
        }

        let slot = self
            .snapshot
            .slots_by_day
            .get(day_label)
            .and_then(|times| times.get(time_label))
            .cloned()
            .unwrap_or_default();

        let ctx = AdmissionContext {
            role: self.role(),
            restrictions: &self.snapshot.restrictions,
            planned_closures: &self.snapshot.planned_closures,
            workshop_slots: &self.snapshot.workshop_slots,
            current_workshop_occurrences: &self.snapshot.current_workshop_occurrences,
            current_workshop_name: self.snapshot.current_workshop_name.as_deref(),
        };
        let coord = coord_key(day_label, time_label);
        if let Err(denial) = check_admission(&slot, start, weekday, &coord, &ctx, now) {
            return Ok(self.reject(denial));
        }

        let mine: Vec<NaiveDateTime> = self
            .snapshot
            .committed_slots
            .iter()
            .copied()
            .chain(self.selections.iter().map(|e| e.start))
            .collect();
        if let Err(denial) = quota::can_add(start, &mine, &self.limits, self.base_date) {
            return Ok(self.reject(denial));
        }

        self.selections.push(entry);
        self.message = None;
        self.notify();
        Ok(self.result(true))
    }

    /// Drop every in-session selection.
    pub fn clear(&mut self) {
        self.selections.clear();
        self.message = None;
        self.notify();
    }

    fn reject(&mut self, denial: Denial) -> ToggleResult {
        tracing::info!(denial = %denial, "slot toggle refused");
        self.message = Some(denial.to_string());
        self.result(false)
    }

    fn result(&self, selected: bool) -> ToggleResult {
        ToggleResult {
            selected,
            selection_keys: self.selection_keys(),
            message: self.message.clone(),
        }
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_selection_changed {
            listener(&self.selection_keys());
        }
    }
}
