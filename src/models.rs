use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Authorization Snapshot ---

/// Role
///
/// The RBAC field. Exactly one value per account; roles are not a set.
/// `Unknown` absorbs any role string this client version does not recognize
/// (`#[serde(other)]`), so a newer server can never break deserialization —
/// an unknown role simply routes to the public landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Admin,
    #[serde(other)]
    Unknown,
}

/// TeacherApproval
///
/// The moderation state of a teacher account. Only meaningful when
/// `role = Teacher`; a teacher may not use the teacher surfaces until an
/// administrator has moved them to `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeacherApproval {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// AccountStatus
///
/// The canonical snapshot of a user's authorization-relevant state, as
/// returned by `GET /auth/me` and inside login/registration responses.
/// Every access-control decision is made from one immutable snapshot of
/// this struct — the engine never reads live session state mid-evaluation.
///
/// Invariants:
/// - `blocked = true` or `active = false` short-circuits every other rule;
///   no role or approval value can override an account suspension.
/// - Exactly one of `teacher_approval` / `admin_certificate_verified` is
///   semantically live at a time, selected by `role`. The other field is
///   carried but ignored.
///
/// The flag fields use `#[serde(default)]` so a service payload that omits
/// a role-irrelevant field still deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountStatus {
    /// Opaque user identifier, issued by the identity service.
    pub id: Uuid,
    pub role: Role,
    /// Account enabled. `false` means the account exists but may not enter
    /// any protected surface.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Administratively suspended. Overrides all other permissions.
    #[serde(default)]
    pub blocked: bool,
    /// Live only when `role = Teacher`.
    #[serde(default)]
    pub teacher_approval: TeacherApproval,
    /// Live only when `role = Admin`. This is a **per-session** verification:
    /// the identity service resets it at login, so it must be re-established
    /// each session rather than persisted indefinitely.
    #[serde(default)]
    pub admin_certificate_verified: bool,
}

fn default_true() -> bool {
    true
}

/// Session
///
/// The live pairing of an auth token and the user it authenticates.
/// Owned exclusively by `SessionStore`; at most one exists per running
/// client. Created by a successful login/registration or by restoring a
/// persisted token at startup; destroyed by logout or by the identity
/// service rejecting the stored token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token. The client never inspects its contents.
    pub token: String,
    pub user: AccountStatus,
    pub issued_at: DateTime<Utc>,
}

// --- Request Payloads (Identity Service Wire Contract) ---

/// LoginRequest
///
/// Body of `POST /auth/login`. The password is passed through to the
/// identity service and never persisted or logged by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// RegisterRequest
///
/// Body of `POST /auth/register`. The requested role is subject to the
/// service's own moderation: teacher accounts come back with
/// `teacher_approval = pending` regardless of what was asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

// --- Response Payloads ---

/// AuthResponse
///
/// Success body of `POST /auth/login` and `POST /auth/register`:
/// the new bearer token plus the authoritative account snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountStatus,
}

/// ApiMessage
///
/// Error body shape the identity service uses for 4xx responses. The
/// `message` field is user-displayable and is surfaced verbatim inside
/// `AuthError::Authentication`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
