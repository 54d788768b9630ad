//! Classroom Application - Session lifecycle and request gateway
//!
//! This crate contains the application core of the classroom client:
//! - Ports for the auth service, key-value storage and the clock
//! - The session manager task and its handle
//! - The request gateway applied around every API call

pub mod error;
pub mod gateway;
pub mod ports;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use gateway::{LOGOUT_PATH, RequestGateway};
pub use session::{SessionConfig, SessionHandle, SessionManager, SessionStatus};
