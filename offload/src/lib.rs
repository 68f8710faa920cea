//! Blocking-workload offload.
//!
//! A CPU-bound [`Computation`] can be run two ways:
//!
//! - [`compute_async`] hands it to an isolated worker thread and suspends the
//!   caller until the worker reports back. The control thread stays free to
//!   service other connections in the meantime.
//! - [`compute_blocking`] runs it inline on the caller's thread. On a
//!   single-threaded runtime this starves every other request until it returns.
//!
//! Both paths share [`OffloadRequest`] validation and diverge only at the
//! dispatch boundary.

pub mod computation;
pub mod error;
pub mod request;
pub mod worker;

pub use computation::{Computation, Fibonacci};
pub use error::{Error, OffloadErrorKind};
pub use request::OffloadRequest;
pub use worker::{compute_async, compute_blocking};
