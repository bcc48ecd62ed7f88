use crate::error::AppError;
use crate::state::AppState;
use aerodesk_shared::{Airplane, BoardingPass, Flight, Passenger, Purchase, Seat, SeatType};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::collections::BTreeSet;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights))
        .route("/v1/flights/{id}", get(get_flight))
        .route("/v1/flights/{id}/passengers", get(list_flight_passengers))
        .route("/v1/passengers", get(list_passengers))
        .route("/v1/passengers/{id}", get(get_passenger))
        .route("/v1/boarding-passes", get(list_boarding_passes))
        .route("/v1/boarding-passes/{id}", get(get_boarding_pass))
        .route("/v1/seats", get(list_seats))
        .route("/v1/seats/{id}", get(get_seat))
        .route("/v1/seat-types", get(list_seat_types))
        .route("/v1/seat-types/{id}", get(get_seat_type))
        .route("/v1/airplanes", get(list_airplanes))
        .route("/v1/airplanes/{id}", get(get_airplane))
        .route("/v1/purchases", get(list_purchases))
        .route("/v1/purchases/{id}", get(get_purchase))
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.repo.list_flights().await?))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Flight>, AppError> {
    state
        .repo
        .get_flight(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Flight", id))
}

/// Passengers holding a boarding pass for the flight, each listed once.
async fn list_flight_passengers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Passenger>>, AppError> {
    if state.repo.get_flight(id).await?.is_none() {
        return Err(AppError::not_found("Flight", id));
    }

    let passenger_ids: Vec<i64> = state
        .repo
        .list_boarding_passes(id)
        .await?
        .iter()
        .map(|p| p.passenger_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut passengers = state.repo.get_passengers(&passenger_ids).await?;
    passengers.sort_by_key(|p| p.passenger_id);
    Ok(Json(passengers))
}

async fn list_passengers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(state.repo.list_passengers().await?))
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Passenger>, AppError> {
    state
        .repo
        .get_passenger(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Passenger", id))
}

async fn list_boarding_passes(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardingPass>>, AppError> {
    Ok(Json(state.repo.list_all_boarding_passes().await?))
}

async fn get_boarding_pass(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BoardingPass>, AppError> {
    state
        .repo
        .get_boarding_pass(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Boarding pass", id))
}

async fn list_seats(State(state): State<AppState>) -> Result<Json<Vec<Seat>>, AppError> {
    Ok(Json(state.repo.list_all_seats().await?))
}

async fn get_seat(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Seat>, AppError> {
    state
        .repo
        .get_seat(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Seat", id))
}

async fn list_seat_types(State(state): State<AppState>) -> Result<Json<Vec<SeatType>>, AppError> {
    Ok(Json(state.repo.list_seat_types().await?))
}

async fn get_seat_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SeatType>, AppError> {
    state
        .repo
        .get_seat_type(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Seat type", id))
}

async fn list_airplanes(State(state): State<AppState>) -> Result<Json<Vec<Airplane>>, AppError> {
    Ok(Json(state.repo.list_airplanes().await?))
}

async fn get_airplane(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Airplane>, AppError> {
    state
        .repo
        .get_airplane(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Airplane", id))
}

async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<Purchase>>, AppError> {
    Ok(Json(state.repo.list_purchases().await?))
}

async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Purchase>, AppError> {
    state
        .repo
        .get_purchase(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Purchase", id))
}
