use thiserror::Error;

/// AuthError
///
/// The normalized failure taxonomy for every identity-service interaction.
/// All transport- and protocol-level failures are caught at the
/// `IdentityService` boundary and mapped into exactly one of these kinds,
/// so callers (`SessionStore`, the UI shell) branch on explicit values
/// instead of exception-style control flow.
///
/// Note that `AccountBlocked`/`AccountInactive` are *not* errors: they are
/// `Deny` verdicts produced by the access-control engine (see `access.rs`).
/// An error means an operation failed; a deny means an operation succeeded
/// and the answer is "no".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Transient transport failure (DNS, connect, timeout, 5xx). The caller
    /// may retry; no session state was changed.
    #[error("identity service unreachable: {0}")]
    Network(String),

    /// The identity service rejected the credentials (invalid login,
    /// duplicate registration, weak password...). Carries the service's
    /// user-displayable message verbatim. No session state was changed.
    #[error("{0}")]
    Authentication(String),

    /// A stored token was rejected (expired, revoked). This triggers a
    /// silent session teardown in `SessionStore::restore` and is never
    /// surfaced to the user as an error.
    #[error("stored session is no longer valid")]
    SessionInvalid,
}
