use std::sync::Arc;

// --- Module Structure ---

// Core decision logic.
pub mod access;
pub mod routes;
pub mod scope;

// Session ownership and the services it depends on.
pub mod error;
pub mod identity;
pub mod models;
pub mod session;
pub mod token_store;

pub mod config;

// --- Public Re-exports ---

// Makes the core types easily accessible to the shell entry point (main.rs)
// and to embedding UIs.
pub use access::{Destination, Verdict, canonical_destination, evaluate};
pub use config::AppConfig;
pub use error::AuthError;
pub use identity::{HttpIdentityClient, IdentityState, MockIdentityService};
pub use models::{AccountStatus, Role, Session, TeacherApproval};
pub use routes::{RouteClassification, classify};
pub use scope::{DataScopeRouter, RoutePlan, SharedDataState};
pub use session::SessionStore;
pub use token_store::{FileTokenStore, MockTokenStore, TokenStoreState};

/// AppState
///
/// Implements the **Unified State Pattern** for the client: the single
/// container holding the constructed session store, the navigation planner
/// built on top of it, and the immutable configuration. There is no global
/// session — everything that needs session state receives it from here by
/// reference (dependency injection), preserving "one session per running
/// client" without hidden mutable globals.
#[derive(Clone)]
pub struct AppState {
    /// The single authoritative session owner.
    pub session: Arc<SessionStore>,
    /// Per-navigation planner: classification + data scope + verdict.
    pub scope: Arc<DataScopeRouter>,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// new
    ///
    /// Assembles the application state from explicit service
    /// implementations. Production wiring (HTTP identity client, file token
    /// store, HTTP shared-data loader) lives in main.rs; tests inject mocks
    /// here directly.
    pub fn new(
        config: AppConfig,
        identity: IdentityState,
        tokens: TokenStoreState,
        shared: SharedDataState,
    ) -> Self {
        let session = Arc::new(SessionStore::new(identity, tokens));
        let scope = Arc::new(DataScopeRouter::new(session.clone(), shared));
        Self {
            session,
            scope,
            config,
        }
    }
}
