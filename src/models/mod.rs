pub mod restrictions;
pub mod selection;
pub mod slot;

pub use restrictions::{DayHours, PlannedClosure, RestrictionSet, Role};
pub use selection::SelectionEntry;
pub use slot::Slot;
