use std::env;

use crate::services::quota::{DEFAULT_MAX_SLOTS_PER_DAY, DEFAULT_MAX_SLOTS_PER_WEEK};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Number of visible grid days, starting today.
    pub grid_days: usize,
    /// Default bookable hour range, overridden by member open hours.
    pub open_hour: u32,
    pub close_hour: u32,
    pub max_slots_per_day: u32,
    pub max_slots_per_week: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            grid_days: env::var("GRID_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(21),
            open_hour: env::var("GRID_OPEN_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            close_hour: env::var("GRID_CLOSE_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(22),
            max_slots_per_day: env::var("MAX_SLOTS_PER_DAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SLOTS_PER_DAY),
            max_slots_per_week: env::var("MAX_SLOTS_PER_WEEK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SLOTS_PER_WEEK),
        }
    }
}
