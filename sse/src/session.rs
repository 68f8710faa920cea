use crate::message::{stream_end_event, StreamEvent};
use async_stream::stream;
use axum::response::sse::Event;
use futures::Stream;
use log::*;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Unique identifier for a stream session (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many counter events a session emits and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub period: Duration,
    pub count: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            count: 15,
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every counter event and the terminal sentinel were handed to the transport.
    Completed,
    /// The response body was dropped before the session completed.
    ClientDisconnected,
}

/// Per-connection stream state.
///
/// The session owns its ticker. Whoever owns the session therefore owns the timer, and
/// dropping the session (hyper drops the response body when the client goes away)
/// cancels every future tick with it.
pub struct StreamSession {
    id: SessionId,
    pacing: Pacing,
    ticker: Interval,
    tick_count: u32,
    active: bool,
    ended: watch::Sender<Option<SessionEnd>>,
}

impl StreamSession {
    /// Opens a session whose first event is due one `period` from now.
    pub fn new(pacing: Pacing) -> Self {
        let mut ticker = interval_at(Instant::now() + pacing.period, pacing.period);
        // A late tick pushes the following ones back rather than bursting to catch up.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let id = SessionId::new();
        info!(
            "Opened stream session {id} ({} events every {:?})",
            pacing.count, pacing.period
        );

        Self {
            id,
            pacing,
            ticker,
            tick_count: 0,
            active: true,
            ended: watch::Sender::new(None),
        }
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Observes how the session ends. Holds `None` while it is still running.
    pub fn subscribe_end(&self) -> watch::Receiver<Option<SessionEnd>> {
        self.ended.subscribe()
    }

    /// Waits for the next tick and returns its event, or `None` once all `count` events
    /// were produced or the session was closed.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        if !self.active || self.tick_count >= self.pacing.count {
            return None;
        }

        self.ticker.tick().await;
        let event = StreamEvent::new(self.tick_count);
        self.tick_count += 1;
        trace!("Session {} emitting event {}", self.id, event.id);
        Some(event)
    }

    /// Tears the session down. Only the first call has an effect and returns `true`;
    /// later calls (e.g. completion racing a disconnect) are no-ops.
    pub fn close(&mut self, end: SessionEnd) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;

        match end {
            SessionEnd::Completed => {
                info!("Server completed stream session {}", self.id);
            }
            SessionEnd::ClientDisconnected => {
                info!(
                    "Client disconnected after {} event(s). Stopping stream session {}.",
                    self.tick_count, self.id
                );
            }
        }
        self.ended.send_replace(Some(end));
        true
    }

    /// Turns the session into the response body stream: `count` paced counter events
    /// followed by the terminal sentinel.
    pub fn into_stream(self) -> impl Stream<Item = Result<Event, axum::Error>> {
        let mut session = self;

        stream! {
            while let Some(event) = session.next_event().await {
                yield event.to_sse();
            }

            yield Ok(stream_end_event());
            session.close(SessionEnd::Completed);
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if self.active {
            self.close(SessionEnd::ClientDisconnected);
        }
    }
}
