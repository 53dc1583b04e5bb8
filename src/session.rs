use chrono::Utc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::access::{self, Destination, Verdict};
use crate::error::AuthError;
use crate::identity::IdentityState;
use crate::models::{AccountStatus, LoginRequest, RegisterRequest, Session};
use crate::routes;
use crate::token_store::TokenStoreState;

/// SessionState
///
/// The snapshot SessionStore publishes to readers. `loading` is true from
/// construction until `restore()` resolves; the shell must render an
/// interim loading view and must not evaluate routes while it is set, so
/// the engine never sees a partially-restored status.
struct SessionState {
    loading: bool,
    session: Option<Session>,
}

/// SessionStore
///
/// Owns the single authoritative Session (or its absence) and performs the
/// operations that create and destroy it. Constructed explicitly and shared
/// as `Arc<SessionStore>` — session state is injected into whatever needs
/// it, never reached through a global.
///
/// Concurrency model: all mutating operations (`restore`, `login`,
/// `register`, `logout`) serialize on one async mutex, so two in-flight
/// calls can never interleave their writes to the persisted token or the
/// in-memory session. A second caller simply waits and then observes the
/// completed state. Readers (`current`) take a consistent snapshot under
/// the state lock; `evaluate_route` additionally waits on the op lock
/// first, so a navigation racing an in-flight login evaluates against the
/// session state as of that call's completion, never a stale snapshot
/// taken before it.
pub struct SessionStore {
    identity: IdentityState,
    tokens: TokenStoreState,
    state: RwLock<SessionState>,
    op_lock: Mutex<()>,
    restore_attempted: AtomicBool,
}

impl SessionStore {
    pub fn new(identity: IdentityState, tokens: TokenStoreState) -> Self {
        Self {
            identity,
            tokens,
            state: RwLock::new(SessionState {
                loading: true,
                session: None,
            }),
            op_lock: Mutex::new(()),
            restore_attempted: AtomicBool::new(false),
        }
    }

    /// publish
    ///
    /// Atomically installs the new session (or its absence) and marks the
    /// store as no longer loading. Every mutating operation terminates here,
    /// which is what guarantees `loading` always reaches a terminal false.
    fn publish(&self, session: Option<Session>) {
        let mut state = self.state.write().expect("session state lock poisoned");
        state.session = session;
        state.loading = false;
    }

    /// restore
    ///
    /// Startup session recovery. If a persisted token exists, asks the
    /// identity service who it belongs to; on success installs the restored
    /// session, on *any* failure (network included) clears the persisted
    /// token so a stale or invalid token is never cached indefinitely.
    /// Either way the store resolves to `loading = false` and no error
    /// escapes — a failed restore is just "unauthenticated".
    ///
    /// At most one identity call is made per startup: repeat invocations
    /// are no-ops, and the call is skipped entirely when no token is stored.
    pub async fn restore(&self) {
        let _guard = self.op_lock.lock().await;

        if self.restore_attempted.swap(true, Ordering::SeqCst) {
            return;
        }

        let Some(token) = self.tokens.load() else {
            self.publish(None);
            return;
        };

        match self.identity.me(&token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored from persisted token");
                self.publish(Some(Session {
                    token,
                    user,
                    issued_at: Utc::now(),
                }));
            }
            Err(e) => {
                // SessionInvalid here is the expected expiry path; network
                // failures get the same silent teardown so the client never
                // boots into a half-trusted session.
                tracing::warn!("persisted session rejected, clearing token: {e}");
                self.tokens.clear();
                self.publish(None);
            }
        }
    }

    /// login
    ///
    /// Exchanges credentials for a new session. On success the token is
    /// persisted, the session installed, and the caller receives the
    /// canonical post-login destination for the returned account status.
    /// On failure nothing is mutated and the error is returned for display.
    pub async fn login(&self, email: &str, password: &str) -> Result<Destination, AuthError> {
        let _guard = self.op_lock.lock().await;

        let response = self
            .identity
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.install(response.token, response.user)
    }

    /// register
    ///
    /// Creates a new account. Same success/failure contract as `login`;
    /// the post-registration landing comes from the same canonical
    /// destination table.
    pub async fn register(&self, profile: RegisterRequest) -> Result<Destination, AuthError> {
        let _guard = self.op_lock.lock().await;

        let response = self.identity.register(profile).await?;

        self.install(response.token, response.user)
    }

    /// install
    ///
    /// Shared success path for login/register: persist the token, publish
    /// the session, compute the landing destination. A persistence failure
    /// does not fail the operation — the user did authenticate; only the
    /// cross-restart convenience is lost.
    fn install(&self, token: String, user: AccountStatus) -> Result<Destination, AuthError> {
        if let Err(e) = self.tokens.save(&token) {
            tracing::warn!("failed to persist session token: {e}");
        }

        let destination = access::canonical_destination(&user);
        tracing::info!(user_id = %user.id, role = ?user.role, "session established");

        self.publish(Some(Session {
            token,
            user,
            issued_at: Utc::now(),
        }));

        Ok(destination)
    }

    /// logout
    ///
    /// Best-effort notifies the identity service (a failure there is logged
    /// and swallowed — the server will expire the token on its own), then
    /// unconditionally clears both the persisted token and the in-memory
    /// session. Idempotent: with no session it skips the network call and
    /// still routes to the public landing.
    pub async fn logout(&self) -> Destination {
        let _guard = self.op_lock.lock().await;

        let token = {
            let state = self.state.read().expect("session state lock poisoned");
            state.session.as_ref().map(|s| s.token.clone())
        };

        if let Some(token) = token {
            if let Err(e) = self.identity.logout(&token).await {
                tracing::debug!("logout notification failed (ignored): {e}");
            }
        }

        self.tokens.clear();
        self.publish(None);

        Destination::PublicLanding
    }

    /// current
    ///
    /// The present account status, or `None` for unauthenticated.
    /// Never fails.
    pub fn current(&self) -> Option<AccountStatus> {
        self.state
            .read()
            .expect("session state lock poisoned")
            .session
            .as_ref()
            .map(|s| s.user.clone())
    }

    /// is_loading
    ///
    /// True until `restore()` has resolved. The shell gates route
    /// evaluation on this flag.
    pub fn is_loading(&self) -> bool {
        self.state
            .read()
            .expect("session state lock poisoned")
            .loading
    }

    /// token
    ///
    /// The live bearer token, for callers issuing authenticated platform
    /// requests outside this store.
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .expect("session state lock poisoned")
            .session
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// evaluate_route
    ///
    /// The `evaluate(route)` operation of the external interface: classify
    /// the target route and run the pure access-control engine against the
    /// current status. A navigation that races an in-flight login, register,
    /// or logout first waits for that operation to complete, so the verdict
    /// is computed from the settled session state rather than a stale
    /// snapshot taken before the operation finished. Only meaningful once
    /// `is_loading()` is false.
    pub async fn evaluate_route(&self, route_id: &str) -> Verdict {
        // Acquire and immediately release the op lock: this parks the
        // navigation behind any in-flight mutating operation without
        // holding the lock during the pure evaluation itself.
        drop(self.op_lock.lock().await);

        let classification = routes::classify(route_id);
        access::evaluate(self.current().as_ref(), &classification, route_id)
    }
}
