//! Adapters for external systems
//!
//! Implementations of application ports against real infrastructure.

mod reqwest_client;
mod rest_auth_api;
mod system_clock;

pub use reqwest_client::{ReqwestClient, check_status, decode_json, extract_detail};
pub use rest_auth_api::RestAuthApi;
pub use system_clock::SystemClock;
