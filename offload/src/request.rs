use std::num::IntErrorKind;

use crate::error::Error;

/// A validated request to run a computation for `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffloadRequest {
    pub n: u32,
}

impl OffloadRequest {
    /// Validates a raw path segment as a non-negative integer.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_argument("missing numeric parameter `n`"));
        }

        match trimmed.parse::<u32>() {
            Ok(n) => Ok(OffloadRequest { n }),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(Error::invalid_argument(
                format!("{trimmed} is out of range, the largest accepted value is {}", u32::MAX),
            )
            .with_source(e)),
            Err(e) => Err(Error::invalid_argument(format!(
                "expected a non-negative integer, got {raw:?}"
            ))
            .with_source(e)),
        }
    }
}
