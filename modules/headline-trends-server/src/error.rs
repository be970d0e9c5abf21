use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use headline_trends_core::TrendsError;

/// Maps [`TrendsError`] onto an HTTP status with a generic body.
/// The underlying detail is logged, never sent to the client.
#[derive(Debug)]
pub struct ApiError(pub TrendsError);

impl From<TrendsError> for ApiError {
    fn from(err: TrendsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!(error = %self.0, "Rejected request");
        } else {
            error!(error = ?self.0, "Request failed");
        }

        generic_response(status)
    }
}

/// Plain-text response whose body is the status reason phrase.
pub fn generic_response(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or("Error")).into_response()
}
