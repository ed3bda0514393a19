use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::ApiError;
use crate::dto::{ReservationRequest, ReservationResponse};

async fn create_reservation(
    State(state): State<crate::ServerState>,
    Json(body): Json<ReservationRequest>,
) -> Result<Response, ApiError> {
    let reservation = state.reservation_service().create(body.into())?;
    let location = format!("/reservations/{}", reservation.id);
    let response = Json(ReservationResponse::from(reservation));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], response).into_response())
}

async fn show_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let reservation = state.reservation_service().get(id)?;
    Ok(Json(ReservationResponse::from(reservation)).into_response())
}

async fn list_reservations(State(state): State<crate::ServerState>) -> Result<Response, ApiError> {
    let reservations = state
        .reservation_service()
        .list()?
        .into_iter()
        .map(ReservationResponse::from)
        .collect::<Vec<_>>();
    Ok(Json(reservations).into_response())
}

async fn delete_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.reservation_service().delete(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn router() -> Router<crate::ServerState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:id", get(show_reservation).delete(delete_reservation))
}
