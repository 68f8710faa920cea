//! Typed parameters for endpoint inputs.
//!
//! Path and query inputs are deserialized into these structs before a controller sees
//! them. Semantic validation (e.g. "must be a non-negative integer") belongs to the layer
//! that owns the operation, so that every caller shares it.

pub(crate) mod fibonacci;
