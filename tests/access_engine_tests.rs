use academy_client::{
    access::{DenyReason, Destination, Verdict, canonical_destination, evaluate},
    models::{AccountStatus, Role, TeacherApproval},
    routes::RouteClassification,
};
use uuid::Uuid;

// --- Status Builders ---

fn status(role: Role) -> AccountStatus {
    AccountStatus {
        id: Uuid::from_u128(7),
        role,
        active: true,
        blocked: false,
        teacher_approval: TeacherApproval::Pending,
        admin_certificate_verified: false,
    }
}

fn approved_teacher() -> AccountStatus {
    AccountStatus {
        teacher_approval: TeacherApproval::Approved,
        ..status(Role::Teacher)
    }
}

fn verified_admin() -> AccountStatus {
    AccountStatus {
        admin_certificate_verified: true,
        ..status(Role::Admin)
    }
}

fn all_statuses() -> Vec<AccountStatus> {
    vec![
        status(Role::Student),
        status(Role::Teacher),
        approved_teacher(),
        status(Role::Admin),
        verified_admin(),
        status(Role::Unknown),
        AccountStatus {
            blocked: true,
            ..status(Role::Admin)
        },
        AccountStatus {
            active: false,
            ..status(Role::Student)
        },
    ]
}

// --- Rule 1: Public routes are always allowed ---

#[test]
fn public_routes_allow_every_status_including_unauthenticated() {
    for classification in [
        RouteClassification::Public,
        RouteClassification::PublicWithSharedData,
    ] {
        assert_eq!(evaluate(None, &classification, "/"), Verdict::Allow);
        for s in all_statuses() {
            assert_eq!(
                evaluate(Some(&s), &classification, "/"),
                Verdict::Allow,
                "status {s:?} should be allowed on {classification:?}"
            );
        }
    }
}

// --- Rule 2: unauthenticated redirects to login with return route ---

#[test]
fn unauthenticated_on_protected_any_redirects_to_login_with_return_route() {
    let verdict = evaluate(None, &RouteClassification::ProtectedAny, "/profile");
    assert_eq!(
        verdict,
        Verdict::Redirect(Destination::Login {
            return_to: "/profile".to_string()
        })
    );
}

#[test]
fn unauthenticated_redirect_applies_to_every_protected_classification() {
    let classifications = [
        RouteClassification::ProtectedAny,
        RouteClassification::ProtectedRole(Role::Teacher),
        RouteClassification::ProtectedRoleAllowList(vec![Role::Admin]),
    ];
    for classification in classifications {
        match evaluate(None, &classification, "/x") {
            Verdict::Redirect(Destination::Login { return_to }) => assert_eq!(return_to, "/x"),
            other => panic!("expected login redirect for {classification:?}, got {other:?}"),
        }
    }
}

// --- Rules 3/4: suspension overrides everything ---

#[test]
fn blocked_denies_every_non_public_classification_regardless_of_role() {
    let classifications = [
        RouteClassification::ProtectedAny,
        RouteClassification::ProtectedRole(Role::Student),
        RouteClassification::ProtectedRole(Role::Teacher),
        RouteClassification::ProtectedRole(Role::Admin),
        RouteClassification::ProtectedRoleAllowList(vec![Role::Admin]),
        RouteClassification::ProtectedRoleAllowList(vec![Role::Teacher]),
    ];
    for role in [Role::Student, Role::Teacher, Role::Admin, Role::Unknown] {
        // Even a fully verified/approved account is stopped by the block.
        let mut s = status(role);
        s.blocked = true;
        s.teacher_approval = TeacherApproval::Approved;
        s.admin_certificate_verified = true;
        for classification in &classifications {
            assert_eq!(
                evaluate(Some(&s), classification, "/x"),
                Verdict::Deny(DenyReason::AccountBlocked),
                "blocked {role:?} on {classification:?}"
            );
        }
    }
}

#[test]
fn inactive_denies_after_blocked_check() {
    let mut s = status(Role::Student);
    s.active = false;
    assert_eq!(
        evaluate(Some(&s), &RouteClassification::ProtectedAny, "/profile"),
        Verdict::Deny(DenyReason::AccountInactive)
    );

    // Blocked wins over inactive when both are set.
    s.blocked = true;
    assert_eq!(
        evaluate(Some(&s), &RouteClassification::ProtectedAny, "/profile"),
        Verdict::Deny(DenyReason::AccountBlocked)
    );
}

// --- Rule 5: wrong role bounces to the caller's canonical home ---

#[test]
fn student_on_teacher_route_redirects_to_student_dashboard() {
    let s = status(Role::Student);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Teacher),
            "/teacher/dashboard"
        ),
        Verdict::Redirect(Destination::StudentDashboard)
    );
}

#[test]
fn unverified_admin_on_teacher_route_redirects_to_certificate_verification() {
    // Rule 5 routes through canonical_destination, which sends an
    // unverified admin to the verification flow, not the dashboard.
    let s = status(Role::Admin);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Teacher),
            "/teacher/dashboard"
        ),
        Verdict::Redirect(Destination::AdminCertificateVerification)
    );
}

// --- Rules 6/7: the per-session admin certificate gate ---

#[test]
fn unverified_admin_on_admin_route_redirects_to_verification() {
    let s = status(Role::Admin);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Admin),
            "/admin/dashboard"
        ),
        Verdict::Redirect(Destination::AdminCertificateVerification)
    );
}

#[test]
fn unverified_admin_allowed_on_the_verification_surface_itself() {
    let s = status(Role::Admin);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRoleAllowList(vec![Role::Admin]),
            "/admin/verify-certificate"
        ),
        Verdict::Allow
    );
}

#[test]
fn verified_admin_allowed_on_admin_routes() {
    let s = verified_admin();
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Admin),
            "/admin/dashboard"
        ),
        Verdict::Allow
    );
}

// --- Rule 8: teacher approval gate ---

#[test]
fn pending_teacher_on_teacher_route_redirects_to_pending_approval() {
    let s = status(Role::Teacher);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Teacher),
            "/teacher/dashboard"
        ),
        Verdict::Redirect(Destination::TeacherPendingApproval)
    );
}

#[test]
fn rejected_teacher_is_also_held_on_the_pending_surface() {
    let mut s = status(Role::Teacher);
    s.teacher_approval = TeacherApproval::Rejected;
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Teacher),
            "/teacher/courses"
        ),
        Verdict::Redirect(Destination::TeacherPendingApproval)
    );
}

#[test]
fn pending_teacher_allowed_on_the_pending_approval_surface_itself() {
    let s = status(Role::Teacher);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRoleAllowList(vec![Role::Teacher]),
            "/teacher/pending-approval"
        ),
        Verdict::Allow
    );
}

#[test]
fn approved_teacher_allowed_on_teacher_routes() {
    let s = approved_teacher();
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRole(Role::Teacher),
            "/teacher/dashboard"
        ),
        Verdict::Allow
    );
}

// --- Rule 9: allow list excludes the caller ---

#[test]
fn student_off_allow_list_redirects_to_student_dashboard() {
    let s = status(Role::Student);
    assert_eq!(
        evaluate(
            Some(&s),
            &RouteClassification::ProtectedRoleAllowList(vec![Role::Admin]),
            "/admin/verify-certificate"
        ),
        Verdict::Redirect(Destination::StudentDashboard)
    );
}

// --- Rule 10: ProtectedAny ---

#[test]
fn any_live_session_allowed_on_protected_any() {
    for s in [
        status(Role::Student),
        status(Role::Teacher),
        status(Role::Admin),
        status(Role::Unknown),
    ] {
        assert_eq!(
            evaluate(Some(&s), &RouteClassification::ProtectedAny, "/profile"),
            Verdict::Allow,
            "{:?}",
            s.role
        );
    }
}

// --- canonical_destination ---

#[test]
fn canonical_destination_table() {
    assert_eq!(
        canonical_destination(&status(Role::Student)),
        Destination::StudentDashboard
    );
    assert_eq!(
        canonical_destination(&status(Role::Teacher)),
        Destination::TeacherPendingApproval
    );
    assert_eq!(
        canonical_destination(&approved_teacher()),
        Destination::TeacherDashboard
    );
    assert_eq!(
        canonical_destination(&status(Role::Admin)),
        Destination::AdminCertificateVerification
    );
    assert_eq!(
        canonical_destination(&verified_admin()),
        Destination::AdminDashboard
    );
    assert_eq!(
        canonical_destination(&status(Role::Unknown)),
        Destination::PublicLanding
    );
}

#[test]
fn canonical_destination_is_deterministic() {
    for s in all_statuses() {
        assert_eq!(canonical_destination(&s), canonical_destination(&s));
    }
}

#[test]
fn destination_paths_round_trip_through_the_classifier() {
    use academy_client::routes::classify;

    // Every canonical home must classify to the surface its holder is
    // entitled to, so enacting a redirect re-enters the navigation
    // pipeline cleanly instead of bouncing again.
    let expected = [
        (Destination::PublicLanding, RouteClassification::Public),
        (
            Destination::StudentDashboard,
            RouteClassification::ProtectedRole(Role::Student),
        ),
        (
            Destination::TeacherDashboard,
            RouteClassification::ProtectedRole(Role::Teacher),
        ),
        (
            Destination::TeacherPendingApproval,
            RouteClassification::ProtectedRoleAllowList(vec![Role::Teacher]),
        ),
        (
            Destination::AdminDashboard,
            RouteClassification::ProtectedRole(Role::Admin),
        ),
        (
            Destination::AdminCertificateVerification,
            RouteClassification::ProtectedRoleAllowList(vec![Role::Admin]),
        ),
    ];
    for (home, classification) in expected {
        let path = home.path();
        assert_eq!(classify(&path), classification, "{path}");
    }

    let login = Destination::Login {
        return_to: "/teacher/dashboard".to_string(),
    };
    assert_eq!(login.path(), "/login?next=/teacher/dashboard");
    assert_eq!(classify(&login.path()), RouteClassification::Public);
}
