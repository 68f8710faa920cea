use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use offload::{Error as OffloadError, OffloadErrorKind};

#[derive(Debug)]
pub struct Error(OffloadError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            OffloadErrorKind::InvalidArgument(message) => {
                debug!("Rejecting request: {message}");
                (StatusCode::BAD_REQUEST, format!("Invalid argument: {message}")).into_response()
            }
            OffloadErrorKind::WorkerFailure(message) => {
                error!("Offloaded computation failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
            OffloadErrorKind::WorkerTimeout(after) => {
                warn!("Offloaded computation timed out after {after:?}");
                (StatusCode::GATEWAY_TIMEOUT, "GATEWAY TIMEOUT").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<OffloadError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
