use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use roomservice_services::reservation::ReservationError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

trait AsStatusCode {
    fn as_status_code(&self) -> StatusCode;
}

impl AsStatusCode for roomservice_store::Error {
    fn as_status_code(&self) -> StatusCode {
        match self {
            roomservice_store::Error::SlotTaken(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AsStatusCode for ReservationError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ReservationError::DuplicateSlot | ReservationError::NotFound { .. } => {
                StatusCode::BAD_REQUEST
            }
            ReservationError::Store(e) => e.as_status_code(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Reservation(#[from] ReservationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, msg) = match self {
            ApiError::Reservation(e) => (e.as_status_code(), e.to_string()),
        };

        // rejected requests get the bare message, everything else the detail object
        if status_code.is_client_error() {
            warn!(%status_code, "{msg}");
            return (status_code, msg).into_response();
        }

        error!(%status_code, "{msg}");
        let body = Json(json!({
            "error": {
                "detail": msg,
            }
        }));

        (status_code, body).into_response()
    }
}

pub fn router() -> Router<crate::ServerState> {
    Router::new().nest("/reservations", crate::reservations::router())
}
