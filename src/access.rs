use serde::{Deserialize, Serialize};

use crate::models::{AccountStatus, Role, TeacherApproval};
use crate::routes::RouteClassification;

/// Destination
///
/// A concrete navigation target the UI shell can enact. `Login` carries the
/// originally requested route so the shell can return there after a
/// successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "destination", rename_all = "snake_case")]
pub enum Destination {
    PublicLanding,
    Login { return_to: String },
    StudentDashboard,
    TeacherDashboard,
    TeacherPendingApproval,
    AdminDashboard,
    AdminCertificateVerification,
}

impl Destination {
    /// path
    ///
    /// Renders the destination as the route path the shell navigates to.
    /// These paths are the same identifiers `routes::classify` understands,
    /// so a redirect target always re-enters the classifier cleanly.
    pub fn path(&self) -> String {
        match self {
            Destination::PublicLanding => "/".to_string(),
            Destination::Login { return_to } => format!("/login?next={return_to}"),
            Destination::StudentDashboard => "/student/dashboard".to_string(),
            Destination::TeacherDashboard => "/teacher/dashboard".to_string(),
            Destination::TeacherPendingApproval => "/teacher/pending-approval".to_string(),
            Destination::AdminDashboard => "/admin/dashboard".to_string(),
            Destination::AdminCertificateVerification => "/admin/verify-certificate".to_string(),
        }
    }
}

/// DenyReason
///
/// Why an authenticated user is refused outright. A deny is rendered as a
/// blocking explanatory message, never a redirect — cycling a suspended
/// user back into the app would just bounce them around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    AccountBlocked,
    AccountInactive,
}

/// Verdict
///
/// The access-control engine's output, consumed once per navigation.
/// Every input — including unauthenticated — maps to a defined Verdict;
/// the engine never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Allow,
    Redirect(Destination),
    Deny(DenyReason),
}

/// canonical_destination
///
/// The single "home" route for an account status. This function is the
/// **single source of truth** for role homes: post-login landing,
/// post-registration landing, and mid-session guard redirects all call it,
/// so a user is never shown two different homes for the same status.
///
/// Pure function of `(role, teacher_approval, admin_certificate_verified)`
/// only — no side effects, no other state consulted.
pub fn canonical_destination(status: &AccountStatus) -> Destination {
    match status.role {
        Role::Admin => {
            if status.admin_certificate_verified {
                Destination::AdminDashboard
            } else {
                Destination::AdminCertificateVerification
            }
        }
        Role::Teacher => {
            if status.teacher_approval == TeacherApproval::Approved {
                Destination::TeacherDashboard
            } else {
                Destination::TeacherPendingApproval
            }
        }
        Role::Student => Destination::StudentDashboard,
        Role::Unknown => Destination::PublicLanding,
    }
}

/// evaluate
///
/// The pure access-control decision. Given the most recently known account
/// status (`None` = unauthenticated), the target route's classification, and
/// the requested route id (carried into login redirects), returns the final
/// verdict the shell enacts.
///
/// The rules apply strictly in order; the first match wins:
///
///  1. Publicly viewable classification → Allow, regardless of session
///     state. (`PublicWithSharedData` is access-public; it differs from
///     `Public` only for data scoping.)
///  2. Unauthenticated on any protected classification → Redirect to login,
///     carrying the requested route for post-login return.
///  3. Blocked account → Deny. Suspension overrides everything below.
///  4. Inactive account → Deny.
///  5. Role-owned route targeted by a different role → Redirect to the
///     caller's canonical home.
///  6. Admin route, certificate not verified this session → Redirect to the
///     verification flow.
///  7. Allow-listed surface that admits admins → Allow without certificate
///     verification. This exists so the verification flow itself is
///     reachable by a not-yet-verified admin.
///  8. Teacher route, approval not granted → Redirect to the
///     pending-approval surface.
///  9. Allow-listed surface that does not admit the caller's role →
///     Redirect to the caller's canonical home.
/// 10. Otherwise → Allow.
///
/// Rules 6 and 8 apply to `ProtectedRole` only; allow-listed surfaces are
/// governed by rules 7 and 9. This is what keeps `/admin/verify-certificate`
/// and `/teacher/pending-approval` reachable by the very accounts they are
/// meant to serve.
pub fn evaluate(
    status: Option<&AccountStatus>,
    classification: &RouteClassification,
    requested: &str,
) -> Verdict {
    // Rule 1: anonymous-viewable surfaces short-circuit everything.
    if classification.is_public() {
        return Verdict::Allow;
    }

    // Rule 2: protected surface without a session.
    let Some(status) = status else {
        return Verdict::Redirect(Destination::Login {
            return_to: requested.to_string(),
        });
    };

    // Rules 3/4: suspension short-circuits every role and approval value.
    if status.blocked {
        return Verdict::Deny(DenyReason::AccountBlocked);
    }
    if !status.active {
        return Verdict::Deny(DenyReason::AccountInactive);
    }

    match classification {
        RouteClassification::ProtectedRole(required) => {
            // Rule 5: authenticated, but targeting another role's surface.
            if status.role != *required {
                return Verdict::Redirect(canonical_destination(status));
            }
            // Rule 6: the admin certificate is a per-session gate.
            if *required == Role::Admin && !status.admin_certificate_verified {
                return Verdict::Redirect(Destination::AdminCertificateVerification);
            }
            // Rule 8: teachers wait out moderation on the pending surface.
            if *required == Role::Teacher && status.teacher_approval != TeacherApproval::Approved {
                return Verdict::Redirect(Destination::TeacherPendingApproval);
            }
            Verdict::Allow
        }
        RouteClassification::ProtectedRoleAllowList(roles) => {
            // Rule 7: allow-listed admin surfaces bypass certificate
            // verification so the verification flow is reachable.
            if status.role == Role::Admin && roles.contains(&Role::Admin) {
                return Verdict::Allow;
            }
            // Rule 9: role not on the list.
            if !roles.contains(&status.role) {
                return Verdict::Redirect(canonical_destination(status));
            }
            Verdict::Allow
        }
        // Rule 10: ProtectedAny with a live, unsuspended session.
        _ => Verdict::Allow,
    }
}
