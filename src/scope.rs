use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::access::Verdict;
use crate::error::AuthError;
use crate::routes::{self, RouteClassification};
use crate::session::SessionStore;

// --- Shared Application Data ---

/// Category
///
/// One course category, used by the catalog and navigation surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// SharedData
///
/// The shared application-data context that data-scoped routes render
/// inside. Loaded at most once per navigation, and only after access has
/// been confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SharedData {
    pub categories: Vec<Category>,
}

/// DataScope
///
/// Whether a route's content renders inside the shared data context
/// (`Shared`) or directly (`Direct`). Independent from the access verdict:
/// a pure marketing page is allowed but not data-scoped, and a denied
/// protected page is data-scoped but must never trigger a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataScope {
    Direct,
    Shared,
}

/// data_scope
///
/// Pure mapping from classification to scope: only self-contained `Public`
/// pages skip the wrapper; `PublicWithSharedData` opts in explicitly, and
/// every protected classification is assumed to need it.
pub fn data_scope(classification: &RouteClassification) -> DataScope {
    match classification {
        RouteClassification::Public => DataScope::Direct,
        _ => DataScope::Shared,
    }
}

// --- SharedDataLoader Contract ---

/// SharedDataLoader
///
/// Abstract contract for fetching the shared context. Swappable between
/// the real HTTP loader and the counting Mock, which is how the tests
/// assert that denied navigations never reach the network.
#[async_trait]
pub trait SharedDataLoader: Send + Sync {
    async fn fetch(&self) -> Result<SharedData, AuthError>;
}

/// SharedDataState
///
/// The concrete type used to share the loader across the application state.
pub type SharedDataState = Arc<dyn SharedDataLoader>;

/// HttpSharedDataLoader
///
/// Fetches the shared context from the platform API.
#[derive(Clone)]
pub struct HttpSharedDataLoader {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSharedDataLoader {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SharedDataLoader for HttpSharedDataLoader {
    async fn fetch(&self) -> Result<SharedData, AuthError> {
        let response = self
            .http
            .get(format!("{}/categories", self.base_url))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Network(format!(
                "shared data fetch returned {}",
                response.status()
            )));
        }

        response
            .json::<SharedData>()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }
}

/// MockSharedDataLoader
///
/// Counting in-memory loader for tests. `fetch_calls` lets tests assert
/// the no-fetch-before-Allow guarantee.
#[derive(Default)]
pub struct MockSharedDataLoader {
    pub data: SharedData,
    pub fail: bool,
    pub fetch_calls: AtomicUsize,
}

impl MockSharedDataLoader {
    pub fn new(data: SharedData) -> Self {
        Self {
            data,
            fail: false,
            fetch_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SharedDataLoader for MockSharedDataLoader {
    async fn fetch(&self) -> Result<SharedData, AuthError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AuthError::Network("mock fetch failure".to_string()))
        } else {
            Ok(self.data.clone())
        }
    }
}

// --- DataScopeRouter ---

/// RoutePlan
///
/// Everything the shell needs to enact one navigation: the route's static
/// classification, its data scope, the access verdict, and — only when the
/// route is both data-scoped and allowed — the loaded shared context.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub classification: RouteClassification,
    pub scope: DataScope,
    pub verdict: Verdict,
    pub shared: Option<SharedData>,
}

/// DataScopeRouter
///
/// Composes the route classifier with the session store to decide, per
/// navigation, whether the shared data context wraps the route's content.
/// The wrapping *decision* is made independently of the verdict, but the
/// context is never actually fetched until the verdict is `Allow` — a
/// redirect or deny must not issue unauthorized data requests.
pub struct DataScopeRouter {
    session: Arc<SessionStore>,
    loader: SharedDataState,
}

impl DataScopeRouter {
    pub fn new(session: Arc<SessionStore>, loader: SharedDataState) -> Self {
        Self { session, loader }
    }

    /// prepare
    ///
    /// Produces the full plan for one navigation. A fetch failure on an
    /// allowed route degrades to `shared = None` with a warning rather than
    /// failing the navigation: the verdict is authoritative, the context is
    /// best-effort.
    pub async fn prepare(&self, route_id: &str) -> RoutePlan {
        let classification = routes::classify(route_id);
        let scope = data_scope(&classification);
        // evaluate_route waits out any in-flight auth operation, so the
        // plan reflects the settled session state.
        let verdict = self.session.evaluate_route(route_id).await;

        let shared = match (scope, &verdict) {
            (DataScope::Shared, Verdict::Allow) => match self.loader.fetch().await {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(route = route_id, "shared data fetch failed: {e}");
                    None
                }
            },
            _ => None,
        };

        RoutePlan {
            classification,
            scope,
            verdict,
            shared,
        }
    }
}
