//! Server-Sent Events (SSE) counter stream.
//!
//! Each accepted connection gets its own [`StreamSession`]: a bounded, time-paced
//! sequence of counter events followed by a terminal sentinel.
//!
//! # Wire format
//!
//! ```text
//! data: {"id":0,"timestamp":"3:04:05 PM","message":"Event stream count: 0"}
//!
//! event: streamend
//! data: Stream complete
//!
//! ```
//!
//! # Lifecycle
//!
//! 1. The web layer opens a session when `/stream-data` is requested
//! 2. The session ticks once per `Pacing::period`, emitting ids `0..count`
//! 3. After the last tick it emits the `streamend` sentinel and closes itself
//! 4. If the client goes away first, hyper drops the response body, which drops the
//!    session and its ticker. No tick fires after that and the sentinel is never sent
//!
//! Teardown is idempotent: completion racing a disconnect closes the session once.
//!
//! # Modules
//!
//! - `message`: `StreamEvent` and the terminal sentinel encoding
//! - `session`: `StreamSession`, its pacing and end reasons

pub mod message;
pub mod session;

pub use message::StreamEvent;
pub use session::{Pacing, SessionEnd, StreamSession};
