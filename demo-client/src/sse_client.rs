use anyhow::Result;
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const STREAM_END_EVENT: &str = "streamend";

#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub data: String,
    /// Time since the connection was opened.
    pub received_after: Duration,
}

impl Event {
    pub fn is_stream_end(&self) -> bool {
        self.event_type == STREAM_END_EVENT
    }

    /// Counter events carry JSON; the sentinel carries plain text.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.data).ok()
    }
}

/// A live subscription to `/stream-data`. Dropping it hangs up on the server.
pub struct Connection {
    pub label: String,
    event_rx: mpsc::UnboundedReceiver<Event>,
    handle: tokio::task::JoinHandle<()>,
}

impl Connection {
    pub fn establish(base_url: &str, label: String) -> Result<Self> {
        let url = format!("{}/stream-data", base_url);
        let (tx, rx) = mpsc::unbounded_channel();

        // The server ends the response on purpose after `streamend`; reconnecting
        // would silently start a fresh session.
        let client = es::ClientBuilder::for_url(&url)?
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        let task_label = label.clone();
        let handle = tokio::spawn(async move {
            let opened_at = Instant::now();
            let mut stream = client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(es::SSE::Event(event))) => {
                        let sse_event = Event {
                            event_type: event.event_type,
                            data: event.data,
                            received_after: opened_at.elapsed(),
                        };
                        let finished = sse_event.is_stream_end();

                        if tx.send(sse_event).is_err() {
                            debug!("SSE receiver dropped for {}", task_label);
                            break;
                        }
                        if finished {
                            debug!("Stream end received for {}", task_label);
                            break;
                        }
                    }
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments (keep-alive)
                    }
                    Some(Err(e)) => {
                        warn!("SSE error for {}: {}", task_label, e);
                        break;
                    }
                    None => {
                        debug!("SSE stream ended for {}", task_label);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            label,
            event_rx: rx,
            handle,
        })
    }

    /// Waits for the next event. `Ok(None)` means the server closed the stream.
    pub async fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        match tokio::time::timeout(timeout, self.event_rx.recv()).await {
            Ok(event) => Ok(event),
            Err(_) => anyhow::bail!("Timeout waiting for the next event on {}", self.label),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Aborting the reader drops the HTTP response, which closes the socket.
        self.handle.abort();
    }
}
