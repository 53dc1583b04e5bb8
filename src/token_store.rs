use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// 1. TokenStore Contract

/// TokenStore
///
/// Defines the abstract contract for persisting the single opaque session
/// token across process restarts. Absence of a stored token means
/// unauthenticated. The trait lets the SessionStore run against the real
/// filesystem store in production and an in-memory Mock in tests.
pub trait TokenStore: Send + Sync {
    /// Returns the persisted token, or `None` if nothing (readable) is
    /// stored. Read failures are treated as absence, never as errors —
    /// an unreadable token file must not block startup.
    fn load(&self) -> Option<String>;

    /// Persists the token, replacing any previous value.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Removes the persisted token. Must be a no-op when nothing is stored.
    fn clear(&self);
}

/// TokenStoreState
///
/// The concrete type used to share token persistence across the
/// application state.
pub type TokenStoreState = Arc<dyn TokenStore>;

// 2. The Real Implementation (Filesystem)

/// FileTokenStore
///
/// Persists the token as the entire contents of one well-known file
/// (`AppConfig::token_path`). The token is opaque, so no framing or
/// encoding is needed beyond trimming whitespace on read.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read session token file: {e}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        std::fs::write(&self.path, token)
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("failed to remove session token file: {e}"),
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MockTokenStore
///
/// An in-memory token store for tests. Optionally simulates a write
/// failure to exercise the "session usable in memory, persistence lost"
/// path in SessionStore::login.
#[derive(Default)]
pub struct MockTokenStore {
    inner: Mutex<Option<String>>,
    pub fail_save: bool,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            inner: Mutex::new(Some(token.to_string())),
            fail_save: false,
        }
    }
}

impl TokenStore for MockTokenStore {
    fn load(&self) -> Option<String> {
        self.inner.lock().expect("token store lock poisoned").clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if self.fail_save {
            return Err(io::Error::other("mock save failure"));
        }
        *self.inner.lock().expect("token store lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.inner.lock().expect("token store lock poisoned") = None;
    }
}
