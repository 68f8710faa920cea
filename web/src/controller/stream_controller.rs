use axum::http::header;
use axum::response::sse::Sse;
use axum::response::IntoResponse;
use log::*;
use sse::{Pacing, SessionEnd, StreamSession};

/// GET a bounded counter stream.
///
/// Emits one event per second for fifteen seconds, then a `streamend` event, then ends
/// the response. The session lives inside the response body: when the client disconnects
/// the body is dropped and the session's timer with it.
#[utoipa::path(
    get,
    path = "/stream-data",
    responses(
        (status = 200, description = "15 timed counter events followed by a streamend event", content_type = "text/event-stream", body = String),
    )
)]
pub async fn stream_data() -> impl IntoResponse {
    debug!("GET event stream");

    let session = StreamSession::new(Pacing::default());

    let mut ended = session.subscribe_end();
    tokio::spawn(async move {
        match ended.wait_for(Option::is_some).await.map(|end| *end) {
            Ok(Some(SessionEnd::Completed)) => debug!("Event stream completed"),
            Ok(Some(SessionEnd::ClientDisconnected)) => debug!("Event stream abandoned by client"),
            _ => warn!("Event stream ended without reporting an outcome"),
        }
    });

    // Sse sets `Content-Type: text/event-stream` and `Cache-Control: no-cache`.
    // No keep-alive comments: the stream is short and its bytes are part of the contract.
    (
        [(header::CONNECTION, "keep-alive")],
        Sse::new(session.into_stream()),
    )
}
