use crate::error::AppError;
use crate::state::AppState;
use aerodesk_seating::CheckInResult;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flights/{id}/check-in", post(simulate_check_in))
}

/// Seat every unassigned boarding pass of the flight.
pub async fn simulate_check_in(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> Result<Json<CheckInResult>, AppError> {
    tracing::info!(flight_id, "Check-in requested");
    let result = state.checkin.simulate_check_in(flight_id).await?;
    Ok(Json(result))
}
