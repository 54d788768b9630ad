//! Authentication domain types

mod session;
mod types;

pub use session::Session;
pub use types::{LogoutReceipt, NewUser, TokenGrant, UserRecord, UserRole};
