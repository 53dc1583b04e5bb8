use academy_client::{
    models::Role,
    routes::{RouteClassification, classify},
    scope::{DataScope, data_scope},
};

#[test]
fn public_tier() {
    for route in ["/", "/about", "/contact", "/login", "/register"] {
        assert_eq!(classify(route), RouteClassification::Public, "{route}");
    }
}

#[test]
fn catalog_tier_is_public_with_shared_data() {
    for route in ["/courses", "/search", "/courses/rust-101"] {
        assert_eq!(
            classify(route),
            RouteClassification::PublicWithSharedData,
            "{route}"
        );
    }
}

#[test]
fn authenticated_tier() {
    for route in ["/profile", "/settings"] {
        assert_eq!(classify(route), RouteClassification::ProtectedAny, "{route}");
    }
}

#[test]
fn role_owned_tiers() {
    assert_eq!(
        classify("/student/dashboard"),
        RouteClassification::ProtectedRole(Role::Student)
    );
    assert_eq!(
        classify("/student/quizzes"),
        RouteClassification::ProtectedRole(Role::Student)
    );
    assert_eq!(
        classify("/teacher/dashboard"),
        RouteClassification::ProtectedRole(Role::Teacher)
    );
    assert_eq!(
        classify("/teacher/courses/new"),
        RouteClassification::ProtectedRole(Role::Teacher)
    );
    assert_eq!(
        classify("/admin/dashboard"),
        RouteClassification::ProtectedRole(Role::Admin)
    );
    assert_eq!(
        classify("/admin/users"),
        RouteClassification::ProtectedRole(Role::Admin)
    );
}

#[test]
fn recovery_surfaces_win_over_their_role_prefixes() {
    assert_eq!(
        classify("/teacher/pending-approval"),
        RouteClassification::ProtectedRoleAllowList(vec![Role::Teacher])
    );
    assert_eq!(
        classify("/admin/verify-certificate"),
        RouteClassification::ProtectedRoleAllowList(vec![Role::Admin])
    );
}

#[test]
fn unknown_routes_default_to_public() {
    for route in ["/no-such-page", "/blog/2026", ""] {
        assert_eq!(classify(route), RouteClassification::Public, "{route:?}");
    }
}

#[test]
fn query_strings_do_not_change_the_classification() {
    assert_eq!(
        classify("/login?next=/teacher/dashboard"),
        RouteClassification::Public
    );
    assert_eq!(
        classify("/courses?category=rust"),
        RouteClassification::PublicWithSharedData
    );
    assert_eq!(
        classify("/admin/users?page=2"),
        RouteClassification::ProtectedRole(Role::Admin)
    );
}

#[test]
fn data_scope_mapping() {
    // Only self-contained Public pages render directly; everything else,
    // including anonymous catalog pages and denied protected pages, is
    // classified as data-scoped.
    assert_eq!(data_scope(&classify("/")), DataScope::Direct);
    assert_eq!(data_scope(&classify("/login")), DataScope::Direct);
    assert_eq!(data_scope(&classify("/courses")), DataScope::Shared);
    assert_eq!(data_scope(&classify("/profile")), DataScope::Shared);
    assert_eq!(data_scope(&classify("/admin/dashboard")), DataScope::Shared);
    assert_eq!(
        data_scope(&classify("/teacher/pending-approval")),
        DataScope::Shared
    );
}
