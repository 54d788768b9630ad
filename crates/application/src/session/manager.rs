//! Single-writer session manager.
//!
//! All session state lives inside one task. Callers talk to it through a
//! cloneable [`SessionHandle`]; commands are processed strictly in arrival
//! order, so a user-triggered logout and a background refresh never
//! interleave halfway through each other.

use std::sync::Arc;

use chrono::Duration;
use classroom_domain::{ClientSettings, NewUser, Session, UserRecord};
use classroom_domain::settings::{DEFAULT_REFRESH_SKEW_MINS, DEFAULT_TOKEN_LIFETIME_MINS};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::status::SessionStatus;
use super::store::{RestoreError, SessionStore};
use crate::error::{ApplicationError, ApplicationResult};
use crate::gateway::RequestGateway;
use crate::ports::{AuthApi, AuthApiError, Clock, KeyValueStore};

const COMMAND_BUFFER: usize = 32;

const REGISTER_PATH: &str = "/auth/register";

/// Reason reported when a login fails without a service explanation.
pub const LOGIN_FAILED: &str = "Login failed";

/// Reason reported when a registration fails without a service explanation.
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Timing parameters of the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Lifetime assumed for every credential the service issues.
    pub token_lifetime: Duration,
    /// Lead time before expiry at which a refresh is attempted.
    pub refresh_skew: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_lifetime: Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINS),
            refresh_skew: Duration::minutes(DEFAULT_REFRESH_SKEW_MINS),
        }
    }
}

impl From<&ClientSettings> for SessionConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            token_lifetime: settings.token_lifetime(),
            refresh_skew: settings.refresh_skew(),
        }
    }
}

enum Command {
    Login {
        name: String,
        password: String,
        reply: oneshot::Sender<ApplicationResult<UserRecord>>,
    },
    Logout {
        reply: oneshot::Sender<()>,
    },
    Refresh {
        reply: oneshot::Sender<bool>,
    },
    EnsureFresh {
        reply: oneshot::Sender<bool>,
    },
    Credential {
        reply: oneshot::Sender<Option<String>>,
    },
    Invalidate {
        reply: oneshot::Sender<()>,
    },
    Status {
        reply: oneshot::Sender<SessionStatus>,
    },
}

/// Owner of the session state. Consumed by [`SessionManager::spawn`].
pub struct SessionManager {
    session: Option<Session>,
    api: Arc<dyn AuthApi>,
    store: SessionStore,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a manager over the given auth port, storage and clock.
    #[must_use]
    pub fn new(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Self {
        Self {
            session: None,
            api,
            store: SessionStore::new(storage),
            clock,
            config,
        }
    }

    /// Starts the manager task and returns a handle to it.
    ///
    /// The persisted session is restored before the first command is served.
    /// The task ends once every handle has been dropped.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> SessionHandle {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let api = Arc::clone(&self.api);
        tokio::spawn(self.run(receiver));
        SessionHandle { commands, api }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        self.restore().await;
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        debug!("session manager stopped");
    }

    async fn handle(&mut self, command: Command) {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            Command::Login {
                name,
                password,
                reply,
            } => {
                let _ = reply.send(self.login(&name, &password).await);
            }
            Command::Logout { reply } => {
                self.logout().await;
                let _ = reply.send(());
            }
            Command::Refresh { reply } => {
                let _ = reply.send(self.refresh().await);
            }
            Command::EnsureFresh { reply } => {
                let _ = reply.send(self.ensure_fresh().await);
            }
            Command::Credential { reply } => {
                self.evict_expired();
                let _ = reply.send(self.credential());
            }
            Command::Invalidate { reply } => {
                if self.session.is_some() {
                    info!("credential rejected by the service, clearing session");
                }
                self.clear();
                let _ = reply.send(());
            }
            Command::Status { reply } => {
                self.evict_expired();
                let _ = reply.send(self.status());
            }
        }
    }

    async fn restore(&mut self) {
        let now = self.clock.now();
        match self.store.load() {
            Ok(session) if session.is_expired(now) => {
                info!(user = %session.user.name, "persisted session has expired");
                self.clear();
            }
            Ok(session) => {
                let near_expiry = session.needs_refresh(now, self.config.refresh_skew);
                info!(user = %session.user.name, "restored persisted session");
                self.session = Some(session);
                if near_expiry {
                    debug!("restored credential is inside the refresh window");
                    self.refresh().await;
                }
            }
            Err(RestoreError::Missing(key)) => {
                debug!(key, "no persisted session");
                self.clear();
            }
            Err(e) => {
                warn!(error = %e, "discarding unusable persisted session");
                self.clear();
            }
        }
    }

    async fn login(&mut self, name: &str, password: &str) -> ApplicationResult<UserRecord> {
        let grant = match self.api.login(name, password).await {
            Ok(grant) => grant,
            Err(e) => return Err(self.login_failed(&e)),
        };

        let user = match self.api.current_user(&grant.access_token).await {
            Ok(user) => user,
            Err(e) => return Err(self.login_failed(&e)),
        };

        let session = Session::issued(
            user.clone(),
            grant.access_token,
            self.clock.now(),
            self.config.token_lifetime,
        );
        info!(
            user = %user.name,
            role = %user.role,
            credential = %session.credential_preview(),
            "logged in"
        );
        self.commit(session);
        Ok(user)
    }

    fn login_failed(&mut self, error: &AuthApiError) -> ApplicationError {
        warn!(error = %error, "login failed");
        self.clear();
        failure_reason(error, LOGIN_FAILED)
    }

    async fn logout(&mut self) {
        if let Some(session) = &self.session {
            match self.api.logout(&session.credential).await {
                Ok(receipt) => info!(user_id = receipt.user_id, "logged out"),
                Err(e) => warn!(error = %e, "remote logout failed, clearing local session anyway"),
            }
        }
        self.clear();
    }

    async fn refresh(&mut self) -> bool {
        let Some(credential) = self.session.as_ref().map(|s| s.credential.clone()) else {
            return false;
        };

        match self.api.refresh(&credential).await {
            Ok(grant) if grant.access_token.is_empty() => {
                warn!("refresh returned an empty credential");
                false
            }
            Ok(grant) => {
                let now = self.clock.now();
                if let Some(mut session) = self.session.take() {
                    session.renew(grant.access_token, now, self.config.token_lifetime);
                    debug!(credential = %session.credential_preview(), "credential refreshed");
                    self.commit(session);
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "credential refresh failed, clearing session");
                self.clear();
                false
            }
        }
    }

    async fn ensure_fresh(&mut self) -> bool {
        let now = self.clock.now();
        let due = self
            .session
            .as_ref()
            .is_some_and(|s| s.needs_refresh(now, self.config.refresh_skew));
        if due { self.refresh().await } else { true }
    }

    /// Drops the session once its credential has expired.
    fn evict_expired(&mut self) {
        let now = self.clock.now();
        if self.session.as_ref().is_some_and(|s| s.is_expired(now)) {
            info!("session expired");
            self.clear();
        }
    }

    fn credential(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.credential.clone())
    }

    fn status(&self) -> SessionStatus {
        let now = self.clock.now();
        match &self.session {
            None => SessionStatus::Unauthenticated,
            Some(session) if session.needs_refresh(now, self.config.refresh_skew) => {
                SessionStatus::Expiring {
                    user: session.user.clone(),
                    seconds_remaining: session.seconds_remaining(now),
                }
            }
            Some(session) => SessionStatus::Active {
                user: session.user.clone(),
                seconds_remaining: session.seconds_remaining(now),
            },
        }
    }

    fn commit(&mut self, session: Session) {
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "failed to persist session");
        }
        self.session = Some(session);
    }

    fn clear(&mut self) {
        self.session = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
    }
}

fn failure_reason(error: &AuthApiError, fallback: &str) -> ApplicationError {
    ApplicationError::auth(error.detail().unwrap_or(fallback))
}

/// Cloneable handle to the session manager task.
///
/// Every method suspends until the manager has processed the request. When
/// the manager is gone the handle behaves as if nobody were logged in.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    api: Arc<dyn AuthApi>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.commands.is_closed())
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Option<T> {
        let (reply, response) = oneshot::channel();
        self.commands.send(command(reply)).await.ok()?;
        response.await.ok()
    }

    /// Logs in and, on success, replaces the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Auth`] with the service's explanation (or a
    /// generic one) when either the login or the user lookup fails; any
    /// previous session is cleared in that case.
    pub async fn login(&self, name: &str, password: &str) -> ApplicationResult<UserRecord> {
        self.request(|reply| Command::Login {
            name: name.to_string(),
            password: password.to_string(),
            reply,
        })
        .await
        .unwrap_or(Err(ApplicationError::SessionClosed))
    }

    /// Creates an account.
    ///
    /// The call runs through the request gateway like any resource request: a
    /// credential inside the skew window is refreshed first and a 401 answer
    /// clears the session. Otherwise the session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Auth`] with the service's explanation (or a
    /// generic one) when the registration is refused or the call fails.
    pub async fn register(&self, user: &NewUser) -> ApplicationResult<UserRecord> {
        let gateway = RequestGateway::new(self.clone());
        // The endpoint is public, so the credential itself is not sent.
        gateway.before_dispatch().await;

        match self.api.register(user).await {
            Ok(created) => Ok(created),
            Err(e) => {
                if let AuthApiError::Rejected { status, .. } = &e {
                    gateway.after_receipt(*status, REGISTER_PATH).await;
                }
                warn!(error = %e, "registration failed");
                Err(failure_reason(&e, REGISTRATION_FAILED))
            }
        }
    }

    /// Logs out remotely on a best-effort basis, then clears the session.
    pub async fn logout(&self) {
        self.request(|reply| Command::Logout { reply }).await;
    }

    /// Exchanges the credential for a fresh one.
    ///
    /// Returns false when there is no session or the refresh failed; a failed
    /// refresh clears the session.
    pub async fn refresh(&self) -> bool {
        self.request(|reply| Command::Refresh { reply })
            .await
            .unwrap_or(false)
    }

    /// Refreshes the credential if it is inside the skew window.
    ///
    /// Returns true when nothing had to be done or the refresh succeeded.
    pub async fn ensure_fresh(&self) -> bool {
        self.request(|reply| Command::EnsureFresh { reply })
            .await
            .unwrap_or(false)
    }

    /// The credential, if a session exists and has not expired.
    ///
    /// An expired session is cleared before answering.
    pub async fn current_credential(&self) -> Option<String> {
        self.request(|reply| Command::Credential { reply })
            .await
            .flatten()
    }

    /// Clears the session without contacting the service.
    pub async fn invalidate(&self) {
        self.request(|reply| Command::Invalidate { reply }).await;
    }

    /// Current session status. An expired session is cleared before answering.
    pub async fn status(&self) -> SessionStatus {
        self.request(|reply| Command::Status { reply })
            .await
            .unwrap_or(SessionStatus::Unauthenticated)
    }

    /// The logged-in account, if any.
    pub async fn current_user(&self) -> Option<UserRecord> {
        self.status().await.user().cloned()
    }
}
