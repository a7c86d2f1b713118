use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::services::calendar::{generate_day_labels, generate_time_labels, partition_into_weeks};
use crate::state::AppState;

// GET /api/grid
#[derive(Serialize)]
pub struct GridResponse {
    pub day_labels: Vec<String>,
    pub time_labels: Vec<String>,
    pub weeks: Vec<Vec<String>>,
}

pub async fn get_grid(State(state): State<Arc<AppState>>) -> Json<GridResponse> {
    let today = chrono::Local::now().date_naive();
    let day_labels = generate_day_labels(today, state.config.grid_days);

    // an active member session narrows the visible hours to the derived
    // open-hours range
    let (open, close) = {
        let session = state.session.lock().unwrap();
        session
            .as_ref()
            .and_then(|s| s.restrictions().visible_hours())
            .unwrap_or((state.config.open_hour, state.config.close_hour))
    };

    let time_labels = generate_time_labels(open, close);
    let weeks = partition_into_weeks(&day_labels, 7);

    Json(GridResponse {
        day_labels,
        time_labels,
        weeks,
    })
}
