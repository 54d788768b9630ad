//! Scripted auth service for session tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use classroom_domain::{LogoutReceipt, NewUser, TokenGrant, UserRecord, UserRole};
use parking_lot::Mutex;

use crate::ports::{AuthApi, AuthApiError};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn teacher() -> UserRecord {
    UserRecord {
        id: 1,
        name: "alice".to_string(),
        role: UserRole::Teacher,
        created_at: None,
        updated_at: None,
    }
}

pub fn student() -> UserRecord {
    UserRecord {
        id: 2,
        name: "bob".to_string(),
        role: UserRole::Student,
        created_at: None,
        updated_at: None,
    }
}

pub fn grant(token: &str) -> TokenGrant {
    TokenGrant {
        access_token: token.to_string(),
        token_type: "bearer".to_string(),
    }
}

/// Records every call and answers from scripted results.
///
/// Logins hand out `token-N`, refreshes hand out `refreshed-N`.
pub struct FakeAuthApi {
    calls: Mutex<Vec<String>>,
    login: Mutex<Option<AuthApiError>>,
    current_user: Mutex<Result<UserRecord, AuthApiError>>,
    refresh_error: Mutex<Option<AuthApiError>>,
    logout: Mutex<Result<LogoutReceipt, AuthApiError>>,
    register_error: Mutex<Option<AuthApiError>>,
    logins: Mutex<u32>,
    refreshes: Mutex<u32>,
}

impl FakeAuthApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login: Mutex::new(None),
            current_user: Mutex::new(Ok(teacher())),
            refresh_error: Mutex::new(None),
            logout: Mutex::new(Ok(LogoutReceipt {
                message: "Successfully logged out".to_string(),
                user_id: 1,
            })),
            register_error: Mutex::new(None),
            logins: Mutex::new(0),
            refreshes: Mutex::new(0),
        }
    }

    pub fn failing_login(self, error: AuthApiError) -> Self {
        *self.login.lock() = Some(error);
        self
    }

    pub fn failing_current_user(self, error: AuthApiError) -> Self {
        *self.current_user.lock() = Err(error);
        self
    }

    pub fn failing_register(self, error: AuthApiError) -> Self {
        *self.register_error.lock() = Some(error);
        self
    }

    pub fn set_login(&self, result: Result<(), AuthApiError>) {
        *self.login.lock() = result.err();
    }

    pub fn set_logout(&self, result: Result<LogoutReceipt, AuthApiError>) {
        *self.logout.lock() = result;
    }

    pub fn set_refresh_error(&self, error: Option<AuthApiError>) {
        *self.refresh_error.lock() = error;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn refresh_count(&self) -> u32 {
        *self.refreshes.lock()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn register(&self, user: &NewUser) -> Result<UserRecord, AuthApiError> {
        self.record(format!("register:{}", user.name));
        if let Some(error) = self.register_error.lock().clone() {
            return Err(error);
        }
        Ok(UserRecord {
            id: 3,
            name: user.name.clone(),
            role: user.role,
            created_at: Some(t0()),
            updated_at: None,
        })
    }

    async fn login(&self, name: &str, _password: &str) -> Result<TokenGrant, AuthApiError> {
        self.record(format!("login:{name}"));
        if let Some(error) = self.login.lock().clone() {
            return Err(error);
        }
        let n = {
            let mut logins = self.logins.lock();
            *logins += 1;
            *logins
        };
        Ok(grant(&format!("token-{n}")))
    }

    async fn current_user(&self, credential: &str) -> Result<UserRecord, AuthApiError> {
        self.record(format!("current_user:{credential}"));
        self.current_user.lock().clone()
    }

    async fn refresh(&self, credential: &str) -> Result<TokenGrant, AuthApiError> {
        self.record(format!("refresh:{credential}"));
        if let Some(error) = self.refresh_error.lock().clone() {
            return Err(error);
        }
        let n = {
            let mut refreshes = self.refreshes.lock();
            *refreshes += 1;
            *refreshes
        };
        Ok(grant(&format!("refreshed-{n}")))
    }

    async fn logout(&self, credential: &str) -> Result<LogoutReceipt, AuthApiError> {
        self.record(format!("logout:{credential}"));
        self.logout.lock().clone()
    }
}
