use crate::computation::Computation;
use crate::error::Error;
use crate::request::OffloadRequest;
use log::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs `computation` for `request.n` on an isolated worker thread and resolves once
/// the worker reports a value or a failure.
///
/// The caller's task is suspended at the await on the worker handle, so the runtime's
/// control thread keeps accepting and serving other connections. A worker that panics
/// resolves to `WorkerFailure`. When `timeout` is set, a worker that has not reported in
/// time resolves to `WorkerTimeout` and its eventual result is discarded.
///
/// Dropping the returned future (e.g. the client hung up) detaches the worker. It runs
/// to completion on its own thread and nobody observes the value.
pub async fn compute_async(
    computation: Arc<dyn Computation>,
    request: OffloadRequest,
    timeout: Option<Duration>,
) -> Result<u64, Error> {
    let n = request.n;
    debug!("Dispatching computation for n={n} to a worker thread");

    let started = Instant::now();
    let handle = tokio::task::spawn_blocking(move || computation.compute(n));

    let value = match timeout {
        Some(after) => match tokio::time::timeout(after, handle).await {
            Ok(joined) => joined?,
            Err(_elapsed) => {
                warn!("Worker for n={n} did not report within {after:?}");
                return Err(Error::worker_timeout(after));
            }
        },
        None => handle.await?,
    };

    debug!("Worker for n={n} reported after {:?}", started.elapsed());
    Ok(value)
}

/// Runs `computation` for `request.n` inline, on the calling thread.
///
/// Nothing yields while this runs: on a single-threaded runtime every other
/// connection, including cheap ones, waits until it returns. A panic inside the
/// computation is caught so the control thread survives it.
pub fn compute_blocking(
    computation: &dyn Computation,
    request: OffloadRequest,
) -> Result<u64, Error> {
    let n = request.n;
    warn!("Computing n={n} inline; the control thread is blocked until it finishes");

    let started = Instant::now();
    let value = panic::catch_unwind(AssertUnwindSafe(|| computation.compute(n)))
        .map_err(|payload| Error::worker_failure(panic_message(payload.as_ref())))?;

    info!(
        "Inline computation for n={n} finished after {:?}",
        started.elapsed()
    );
    Ok(value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("computation panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("computation panicked: {message}")
    } else {
        "computation panicked".to_string()
    }
}
