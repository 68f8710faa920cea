use crate::params::fibonacci::FibonacciParams;
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use log::*;
use offload::OffloadRequest;

/// GET the n-th Fibonacci number, computed on a worker thread
#[utoipa::path(
    get,
    path = "/fibonacci/{n}",
    params(FibonacciParams),
    responses(
        (status = 200, description = "Computed off the control thread", body = String),
        (status = 400, description = "n is not a non-negative integer"),
        (status = 500, description = "The worker failed"),
        (status = 504, description = "The worker did not report within the configured timeout"),
    )
)]
pub async fn compute_async(
    State(app_state): State<AppState>,
    Path(params): Path<FibonacciParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET offloaded Fibonacci for n: {}", params.n);

    let request = OffloadRequest::parse(&params.n)?;
    let value = offload::compute_async(
        app_state.computation(),
        request,
        app_state.worker_timeout(),
    )
    .await?;

    Ok(fibonacci_response(value))
}

/// GET the n-th Fibonacci number, computed inline on the control thread.
///
/// Demonstrates starvation: while this runs no other request is serviced. Not meant
/// for anything but the demonstration.
#[utoipa::path(
    get,
    path = "/fibonacci-block/{n}",
    params(FibonacciParams),
    responses(
        (status = 200, description = "Computed inline, blocking every other request meanwhile", body = String),
        (status = 400, description = "n is not a non-negative integer"),
        (status = 500, description = "The computation panicked"),
    )
)]
pub async fn compute_blocking(
    State(app_state): State<AppState>,
    Path(params): Path<FibonacciParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET blocking Fibonacci for n: {}", params.n);

    let request = OffloadRequest::parse(&params.n)?;
    let value = offload::compute_blocking(app_state.computation_ref(), request)?;

    Ok(fibonacci_response(value))
}

fn fibonacci_response(value: u64) -> impl IntoResponse {
    (StatusCode::OK, format!("Fibonacci: {value}"))
}
