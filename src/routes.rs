use serde::{Deserialize, Serialize};

use crate::models::Role;

/// RouteClassification
///
/// The static authorization label attached to each route. Determined purely
/// from the route identifier, never from request state, and never mutated
/// at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "classification", content = "detail", rename_all = "snake_case")]
pub enum RouteClassification {
    /// Anonymous, self-contained page. No session, no shared data.
    Public,
    /// Anonymous page that renders inside the shared application-data
    /// context (catalog, search). Access-wise identical to `Public`.
    PublicWithSharedData,
    /// Requires a session, any role.
    ProtectedAny,
    /// Owned by exactly one role; other roles are bounced to their home.
    ProtectedRole(Role),
    /// Admits the listed roles, bypassing that role's session gates.
    /// This is how the recovery surfaces (certificate verification,
    /// pending approval) stay reachable by accounts that have not yet
    /// cleared those gates.
    ProtectedRoleAllowList(Vec<Role>),
}

impl RouteClassification {
    /// True for surfaces viewable without any session. Used by access rule 1;
    /// the `Public` / `PublicWithSharedData` split only matters for data
    /// scoping.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            RouteClassification::Public | RouteClassification::PublicWithSharedData
        )
    }
}

/// classify
///
/// Pure mapping from a route identifier to its classification. The table is
/// static configuration organized in the platform's three security tiers —
/// public, authenticated, role-owned — with exact paths matched before
/// prefix rules so the allow-listed recovery surfaces win over their
/// role-owned parents.
///
/// Unclassified/unknown route ids default to `Public`: an unknown route
/// renders a public 404 page rather than tripping an auth redirect.
pub fn classify(route_id: &str) -> RouteClassification {
    // Query strings are not part of the route identity.
    let path = route_id.split('?').next().unwrap_or(route_id);

    match path {
        // --- Public tier: marketing and gateway pages, no shared context ---
        "/" | "/about" | "/contact" | "/login" | "/register" => RouteClassification::Public,

        // --- Public tier with shared context: the catalog surfaces render
        // inside the shared data wrapper regardless of auth state ---
        "/courses" | "/search" => RouteClassification::PublicWithSharedData,

        // --- Authenticated tier: any role ---
        "/profile" | "/settings" => RouteClassification::ProtectedAny,

        // --- Recovery surfaces: exact matches, listed before the role
        // prefixes below so they are not swallowed by them ---
        "/teacher/pending-approval" => {
            RouteClassification::ProtectedRoleAllowList(vec![Role::Teacher])
        }
        "/admin/verify-certificate" => {
            RouteClassification::ProtectedRoleAllowList(vec![Role::Admin])
        }

        // --- Role-owned tiers ---
        path if path.starts_with("/student/") => RouteClassification::ProtectedRole(Role::Student),
        path if path.starts_with("/teacher/") => RouteClassification::ProtectedRole(Role::Teacher),
        path if path.starts_with("/admin/") => RouteClassification::ProtectedRole(Role::Admin),

        // Course detail pages share the catalog's classification.
        path if path.starts_with("/courses/") => RouteClassification::PublicWithSharedData,

        // Unknown routes default to Public (public 404).
        _ => RouteClassification::Public,
    }
}
