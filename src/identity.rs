use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::AuthError;
use crate::models::{AccountStatus, ApiMessage, AuthResponse, LoginRequest, RegisterRequest};

// 1. IdentityService Contract

/// IdentityService
///
/// Defines the abstract contract for all interactions with the remote
/// identity service. This trait allows us to swap the concrete
/// implementation—from the real HTTP client (HttpIdentityClient) in
/// production to the in-memory Mock (MockIdentityService) during testing—
/// without affecting the SessionStore.
///
/// Every method normalizes its failures into the `AuthError` taxonomy at
/// this boundary; nothing above it ever sees a raw transport error.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolves the current user for a bearer token (`GET /auth/me`).
    /// A 401-equivalent response maps to `AuthError::SessionInvalid`.
    async fn me(&self, token: &str) -> Result<AccountStatus, AuthError>;

    /// Exchanges credentials for a new session (`POST /auth/login`).
    /// A 4xx response maps to `AuthError::Authentication` carrying the
    /// service's user-displayable message.
    async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError>;

    /// Creates a new account and session (`POST /auth/register`).
    /// Same success/failure contract as `login`.
    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError>;

    /// Invalidates the token server-side (`POST /auth/logout`). Callers
    /// treat a failure here as best-effort only; the local session is torn
    /// down regardless.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;
}

/// IdentityState
///
/// The concrete type used to share the identity service access across the
/// application state.
pub type IdentityState = Arc<dyn IdentityService>;

// 2. The Real Implementation (Platform API over HTTP)

/// HttpIdentityClient
///
/// The concrete implementation speaking the platform's auth contract over
/// HTTP. The token is treated as fully opaque: it is attached as a Bearer
/// header and never inspected client-side.
#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    /// new
    ///
    /// Constructs the client against the API base URL from AppConfig.
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// auth_failure
    ///
    /// Maps a non-success login/register response into the taxonomy:
    /// 4xx carries the service's `{message}` body (with a generic fallback
    /// when the body is missing or malformed); everything else is treated
    /// as a transient transport-level failure.
    async fn auth_failure(response: reqwest::Response) -> AuthError {
        let status = response.status();
        if status.is_client_error() {
            let message = response
                .json::<ApiMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| "Authentication failed".to_string());
            AuthError::Authentication(message)
        } else {
            AuthError::Network(format!("identity service returned {status}"))
        }
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    /// me
    ///
    /// `GET /auth/me` with the stored bearer token. This is the reactive
    /// token-validity check: 401/403 means the session is gone (expired,
    /// revoked, or the user was deleted after the token was issued).
    async fn me(&self, token: &str) -> Result<AccountStatus, AuthError> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::SessionInvalid),
            status if status.is_success() => response
                .json::<AccountStatus>()
                .await
                .map_err(|e| AuthError::Network(e.to_string())),
            status => Err(AuthError::Network(format!(
                "identity service returned {status}"
            ))),
        }
    }

    async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&req)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::auth_failure(response).await);
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }

    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&req)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::auth_failure(response).await);
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }

    /// logout
    ///
    /// `POST /auth/logout`. The acknowledgement body is ignored; only the
    /// status class matters, and the SessionStore ignores even that.
    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthError::Network(format!(
                "logout returned {}",
                response.status()
            )))
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MockIdentityService
///
/// An in-memory implementation of `IdentityService` used for unit and
/// integration testing. It holds one configured account, accepts one
/// credential pair and one token, supports per-operation failure injection,
/// and counts calls so tests can assert at-most-once semantics (e.g. that
/// `SessionStore::restore` makes at most one network call per startup).
pub struct MockIdentityService {
    /// The account returned on successful auth operations.
    pub user: AccountStatus,
    /// The only token `me` accepts and the token minted by login/register.
    pub token: String,
    /// The only credential pair `login` accepts.
    pub email: String,
    pub password: String,
    /// When set, every operation fails with a clone of this error.
    pub fail_with: Option<AuthError>,
    /// When true, `logout` alone fails (to exercise the swallow path).
    pub fail_logout: bool,
    /// When set, every operation sleeps this long before responding,
    /// simulating an in-flight network call for race tests.
    pub delay: Option<Duration>,
    pub me_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl MockIdentityService {
    pub fn new(user: AccountStatus) -> Self {
        Self {
            user,
            token: "mock-token".to_string(),
            email: "user@academy.test".to_string(),
            password: "correct-horse".to_string(),
            fail_with: None,
            fail_logout: false,
            delay: None,
            me_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Applies the configured artificial latency, if any.
    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// A mock where every operation fails with the given error.
    pub fn new_failing(error: AuthError) -> Self {
        let mut mock = Self::new(AccountStatus::default());
        mock.fail_with = Some(error);
        mock
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn me(&self, token: &str) -> Result<AccountStatus, AuthError> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        if token == self.token {
            Ok(self.user.clone())
        } else {
            Err(AuthError::SessionInvalid)
        }
    }

    async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        if req.email == self.email && req.password == self.password {
            Ok(AuthResponse {
                token: self.token.clone(),
                user: self.user.clone(),
            })
        } else {
            Err(AuthError::Authentication(
                "Invalid email or password".to_string(),
            ))
        }
    }

    async fn register(&self, _req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(AuthResponse {
            token: self.token.clone(),
            user: self.user.clone(),
        })
    }

    async fn logout(&self, _token: &str) -> Result<(), AuthError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_logout {
            return Err(AuthError::Network("mock logout failure".to_string()));
        }
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(())
    }
}
