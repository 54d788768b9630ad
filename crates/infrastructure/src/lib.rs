//! Classroom Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer, plus the resource API client:
//! - reqwest transport and the REST auth adapter
//! - the gateway-backed class, assignment and submission client
//! - a JSON file key-value store for the persisted session

pub mod adapters;
pub mod api;
pub mod error;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestClient, RestAuthApi, SystemClock};
pub use api::ClassroomClient;
pub use error::ClientError;
pub use persistence::FileKeyValueStore;
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
