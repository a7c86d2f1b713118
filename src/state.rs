use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::session::BookingSession;

pub struct AppState {
    pub config: AppConfig,
    /// The single in-memory booking session, created by POST /api/session.
    pub session: Mutex<Option<BookingSession>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }
}
