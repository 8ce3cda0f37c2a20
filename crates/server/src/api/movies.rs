//! Movie list API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cinefetch_core::MovieRecord;
use tracing::{error, info, warn};

use super::handlers::MessageResponse;
use crate::metrics::{MOVIES_SERVED_TOTAL, TITLE_LOAD_FAILURES_TOTAL};
use crate::state::AppState;

/// Client-facing text for a 500; details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

/// GET /api/movies
///
/// Loads the title list and looks every title up concurrently. Titles that
/// fail are logged and left out; the response holds whatever succeeded.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MovieRecord>>, impl IntoResponse> {
    let titles = match state.titles().load().await {
        Ok(titles) => titles,
        Err(e) => {
            error!(error = %e, "Failed to load movie titles");
            TITLE_LOAD_FAILURES_TOTAL.inc();
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new(INTERNAL_ERROR_MESSAGE)),
            ));
        }
    };

    let aggregate = state.fan_out().run(titles).await;

    for err in &aggregate.errors {
        warn!(title = %err.title, kind = err.kind(), error = %err.cause, "Movie lookup failed");
    }
    info!(
        count = aggregate.records.len(),
        failed = aggregate.error_count(),
        "Number of movies retrieved"
    );

    MOVIES_SERVED_TOTAL.inc_by(aggregate.records.len() as u64);
    Ok(Json(aggregate.records))
}
