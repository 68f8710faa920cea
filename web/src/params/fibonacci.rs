use serde::Deserialize;
use utoipa::IntoParams;

/// Path parameters for the Fibonacci endpoints
///
/// # Fields
///
/// * `n` - Raw path segment. Kept as text so a malformed value is reported as an
///   invalid argument instead of an extractor rejection.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub(crate) struct FibonacciParams {
    /// Non-negative integer index into the Fibonacci sequence
    #[param(example = "35")]
    pub(crate) n: String,
}
