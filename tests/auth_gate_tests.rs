//! Integration tests for the auth gate, page access and menu activation

mod common;

use common::{init_at, StaticIdentity};
use gpui::TestAppContext;
use suite_navigator::*;

fn profile_requirement() -> AccessRequirement {
    Page::Profile.access_requirement()
}

#[tokio::test]
async fn test_signed_out_caller_is_asked_to_sign_in() {
    let provider = StaticIdentity::signed_out();
    let decision = AuthGate::evaluate(&provider, "/profile", &profile_requirement()).await;
    assert_eq!(decision, GateDecision::Denied(DenyReason::SignInRequired));
}

#[tokio::test]
async fn test_member_denied_admin_page_with_distinct_reason() {
    let provider = StaticIdentity::signed_in(Role::User);
    let requirement = Page::AdminBookings.access_requirement();

    let decision = AuthGate::evaluate(&provider, "/admin/bookings", &requirement).await;
    assert_eq!(
        decision,
        GateDecision::Denied(DenyReason::InsufficientRole {
            required: Role::Admin
        })
    );
    assert_ne!(decision.deny_reason(), Some(&DenyReason::SignInRequired));
}

#[tokio::test]
async fn test_admin_allowed_everywhere() {
    let provider = StaticIdentity::signed_in(Role::Admin);
    for kind_path in ["/admin/bookings", "/admin/transportation", "/profile", "/rooms"] {
        let requirement = dispatch(kind_path).page.access_requirement();
        let decision = AuthGate::evaluate(&provider, kind_path, &requirement).await;
        assert!(decision.is_allowed(), "{}", kind_path);
    }
}

#[tokio::test]
async fn test_failed_identity_query_fails_closed() {
    let provider = StaticIdentity::failing("service unreachable");
    let decision = AuthGate::evaluate(&provider, "/profile", &profile_requirement()).await;
    assert!(decision.is_denied());
}

#[test]
fn test_pending_never_allows() {
    for path in ["/profile", "/admin/bookings", "/admin/transportation"] {
        let requirement = dispatch(path).page.access_requirement();
        let decision = AuthGate::check(&AuthStatus::Pending, path, &requirement);
        assert!(!decision.is_allowed(), "{}", path);
        assert!(decision.fail_closed().is_denied(), "{}", path);
    }
}

#[test]
fn test_no_memoization() {
    let provider = StaticIdentity::signed_in(Role::User);
    let requirement = profile_requirement();
    pollster::block_on(async {
        AuthGate::evaluate(&provider, "/profile", &requirement).await;
        AuthGate::evaluate(&provider, "/profile", &requirement).await;
        AuthGate::query(&provider).await;
    });
    assert_eq!(provider.calls(), 3);
}

#[test]
fn test_identity_document_role_boundary() {
    let cases = [
        (serde_json::json!({ "$id": "a", "prefs": { "role": "admin" } }), Role::Admin),
        (serde_json::json!({ "$id": "b", "prefs": { "role": "ADMIN" } }), Role::User),
        (serde_json::json!({ "$id": "c", "prefs": { "role": null } }), Role::User),
        (serde_json::json!({ "$id": "d", "prefs": {} }), Role::User),
        (serde_json::json!({ "$id": "e" }), Role::User),
        (serde_json::json!({ "$id": "f", "prefs": { "role": true } }), Role::User),
        (serde_json::json!({ "$id": "g", "prefs": { "role": 1 } }), Role::User),
        (serde_json::json!({ "$id": "h", "prefs": null }), Role::User),
        (serde_json::json!({ "$id": "i", "prefs": "admin" }), Role::User),
        (
            serde_json::json!({ "$id": "j", "prefs": { "role": "admin", "theme": 3 } }),
            Role::Admin,
        ),
    ];
    for (doc, role) in cases {
        let identity: Identity = serde_json::from_value(doc).unwrap();
        assert_eq!(identity.role, role, "{}", identity.id);
    }
}

#[gpui::test]
fn test_signed_out_menu_click_does_not_navigate(cx: &mut TestAppContext) {
    let history = init_at(cx, "/menu");
    let provider = StaticIdentity::signed_out();
    let status = pollster::block_on(AuthGate::query(&provider));

    let item = dashboard_menu()
        .into_iter()
        .find(|item| item.destination == "/maintenance")
        .unwrap();
    let activation = cx.update(|cx| activate_menu_item(cx, &item, &status));

    assert_eq!(activation, MenuActivation::Blocked(DenyReason::SignInRequired));
    assert_eq!(
        activation.blocked_reason().map(ToString::to_string).as_deref(),
        Some("Please sign in to access this feature.")
    );
    assert_eq!(cx.read(Navigator::current_path), "/menu");
    assert_eq!(history.entries(), vec!["/menu"]);
}

#[gpui::test]
fn test_member_admin_menu_click_blocked_by_role(cx: &mut TestAppContext) {
    init_at(cx, "/menu");
    let status = AuthStatus::Resolved(AuthContext::signed_in(Role::User));
    let item = admin_menu().remove(0);

    let activation = cx.update(|cx| activate_menu_item(cx, &item, &status));
    assert_eq!(
        activation,
        MenuActivation::Blocked(DenyReason::InsufficientRole {
            required: Role::Admin
        })
    );
    assert_eq!(cx.read(Navigator::current_path), "/menu");
}

#[gpui::test]
fn test_public_menu_entry_navigates_for_guests(cx: &mut TestAppContext) {
    init_at(cx, "/menu");
    let status = AuthStatus::Resolved(AuthContext::anonymous());
    let item = MenuItem::new("Support", "/support");

    let activation = cx.update(|cx| activate_menu_item(cx, &item, &status));
    assert!(activation.blocked_reason().is_none());
    assert_eq!(cx.read(Navigator::current_path), "/support");
    assert!(cx.read(Navigator::current_page).fallback);
}

#[gpui::test]
fn test_page_check_discarded_after_navigating_away(cx: &mut TestAppContext) {
    init_at(cx, "/admin/bookings");
    let mut access = PageAccess::new(Page::AdminBookings.access_requirement());
    let ticket = cx.read(|cx| access.begin(cx.navigation().state()));
    assert_eq!(access.state(), AccessState::Checking);

    cx.update(|cx| Navigator::push(cx, "/rooms"));

    let status = AuthStatus::Resolved(AuthContext::signed_in(Role::User));
    let applied = cx.read(|cx| access.resolve(&ticket, &status, cx.navigation().state()));
    assert!(!applied);
    assert_eq!(access.redirect(), None);
}

#[gpui::test]
fn test_page_check_redirects_member(cx: &mut TestAppContext) {
    init_at(cx, "/admin/transportation");
    let mut access = PageAccess::new(Page::TransportationSurvey.access_requirement());
    let ticket = cx.read(|cx| access.begin(cx.navigation().state()));

    let provider = StaticIdentity::signed_in(Role::User);
    let status = pollster::block_on(AuthGate::query(&provider));
    assert!(cx.read(|cx| access.resolve(&ticket, &status, cx.navigation().state())));

    let redirect = access.redirect().map(str::to_string);
    assert_eq!(redirect.as_deref(), Some("/dashboard"));
    if let Some(path) = redirect {
        cx.update(|cx| Navigator::push(cx, path));
    }
    assert_eq!(cx.read(Navigator::current_page).page, Page::Dashboard);
}

#[gpui::test]
fn test_page_check_keeps_signed_out_caller_on_page(cx: &mut TestAppContext) {
    init_at(cx, "/admin/transportation");
    let mut access = PageAccess::new(Page::TransportationSurvey.access_requirement());
    let ticket = cx.read(|cx| access.begin(cx.navigation().state()));

    let provider = StaticIdentity::failing("service unreachable");
    let status = pollster::block_on(AuthGate::query(&provider));
    assert!(cx.read(|cx| access.resolve(&ticket, &status, cx.navigation().state())));

    assert_eq!(
        access.state(),
        AccessState::Denied(DenyReason::SignInRequired)
    );
    assert_eq!(access.redirect(), None);
    assert_eq!(cx.read(Navigator::current_path), "/admin/transportation");
}
