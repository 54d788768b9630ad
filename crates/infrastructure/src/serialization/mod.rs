//! Deterministic JSON serialization for files written by the client.
//!
//! Output uses sorted keys (via `BTreeMap`), 2-space indentation and a
//! trailing newline.

mod json;

pub use json::*;
