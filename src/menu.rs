//! Menu descriptors and menu activation.
//!
//! A [`MenuItem`] says where an entry leads and who may follow it. Clicking
//! an entry goes through [`activate_menu_item`], which asks the auth gate
//! first and only navigates when the caller is allowed. A caller whose
//! identity is still loading is treated as signed out.

use crate::auth::{AccessRequirement, AuthGate, AuthStatus, DenyReason, Role};
use crate::context::{NavigationOutcome, Navigator};
use crate::path::normalize_path;
use crate::warn_log;
use gpui::App;

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub destination: String,
    pub requires_auth: bool,
    pub required_role: Option<Role>,
}

impl MenuItem {
    /// A public entry.
    pub fn new(title: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            destination: destination.into(),
            requires_auth: false,
            required_role: None,
        }
    }

    /// Only for signed-in callers.
    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Only for signed-in callers holding `role`.
    #[must_use]
    pub fn requires_role(mut self, role: Role) -> Self {
        self.requires_auth = true;
        self.required_role = Some(role);
        self
    }

    pub fn access_requirement(&self) -> AccessRequirement {
        match self.required_role {
            Some(role) => AccessRequirement::role(role),
            None if self.requires_auth => AccessRequirement::signed_in(),
            None => AccessRequirement::public(),
        }
    }

    /// `true` when this entry leads to `current_path`.
    pub fn is_active(&self, current_path: &str) -> bool {
        normalize_path(&self.destination) == normalize_path(current_path)
    }
}

/// Entries of the member dashboard.
pub fn dashboard_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Current Booking", "/current-booking").requires_auth(),
        MenuItem::new("Booking History", "/booking-history").requires_auth(),
        MenuItem::new("News & Updates", "/news"),
        MenuItem::new("Maintenance", "/maintenance").requires_auth(),
        MenuItem::new("Messages", "/messages").requires_auth(),
        MenuItem::new("Support", "/support"),
    ]
}

/// Entries of the admin section of the dashboard.
pub fn admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Booking Requests", "/admin/bookings").requires_role(Role::Admin),
        MenuItem::new("Transportation Survey", "/admin/transportation")
            .requires_role(Role::Admin),
    ]
}

/// Header navigation. Signed-in callers see News where guests see Book Now.
pub fn primary_nav(is_authenticated: bool) -> Vec<MenuItem> {
    let third = if is_authenticated {
        MenuItem::new("News", "/news")
    } else {
        MenuItem::new("Book Now", "/booking")
    };
    vec![
        MenuItem::new("Home", "/"),
        MenuItem::new("Rooms", "/rooms"),
        third,
        MenuItem::new("Menu", "/menu"),
        MenuItem::new("About", "/about"),
        MenuItem::new("Contact", "/contact"),
    ]
}

/// Bottom bar navigation: the first four header entries.
pub fn compact_nav(is_authenticated: bool) -> Vec<MenuItem> {
    let mut items = primary_nav(is_authenticated);
    items.truncate(4);
    items
}

/// Result of clicking a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuActivation {
    Navigated(NavigationOutcome),
    /// Not navigated; show the reason to the user.
    Blocked(DenyReason),
}

impl MenuActivation {
    pub fn blocked_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Blocked(reason) => Some(reason),
            Self::Navigated(_) => None,
        }
    }
}

/// Follow `item` if the caller described by `status` may.
pub fn activate_menu_item(cx: &mut App, item: &MenuItem, status: &AuthStatus) -> MenuActivation {
    let decision =
        AuthGate::check(status, &item.destination, &item.access_requirement()).fail_closed();
    match decision.deny_reason() {
        Some(reason) => {
            warn_log!("menu entry '{}' blocked: {}", item.title, reason);
            MenuActivation::Blocked(*reason)
        }
        None => MenuActivation::Navigated(Navigator::push(cx, item.destination.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use crate::context::init_navigation;
    use crate::history::MemoryHistory;
    use gpui::TestAppContext;

    #[test]
    fn test_primary_nav_swaps_on_auth() {
        let guest: Vec<_> = primary_nav(false).into_iter().map(|i| i.destination).collect();
        let member: Vec<_> = primary_nav(true).into_iter().map(|i| i.destination).collect();
        assert_eq!(guest, ["/", "/rooms", "/booking", "/menu", "/about", "/contact"]);
        assert_eq!(member, ["/", "/rooms", "/news", "/menu", "/about", "/contact"]);
    }

    #[test]
    fn test_compact_nav_keeps_four() {
        let items = compact_nav(true);
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].title, "Menu");
    }

    #[test]
    fn test_is_active() {
        let item = MenuItem::new("Rooms", "/rooms");
        assert!(item.is_active("/rooms/"));
        assert!(!item.is_active("/rooms/17"));
    }

    #[test]
    fn test_admin_menu_requirements() {
        for item in admin_menu() {
            assert_eq!(item.access_requirement(), AccessRequirement::role(Role::Admin));
        }
    }

    #[gpui::test]
    fn test_activation_navigates_when_allowed(cx: &mut TestAppContext) {
        cx.update(|cx| init_navigation(cx, MemoryHistory::new("/menu")));
        let item = dashboard_menu().remove(0);
        let status = AuthStatus::Resolved(AuthContext::signed_in(Role::User));

        let activation = cx.update(|cx| activate_menu_item(cx, &item, &status));
        assert!(matches!(activation, MenuActivation::Navigated(_)));
        assert_eq!(cx.read(Navigator::current_path), "/current-booking");
    }

    #[gpui::test]
    fn test_activation_blocks_while_pending(cx: &mut TestAppContext) {
        cx.update(|cx| init_navigation(cx, MemoryHistory::new("/menu")));
        let item = MenuItem::new("Messages", "/messages").requires_auth();

        let activation = cx.update(|cx| activate_menu_item(cx, &item, &AuthStatus::Pending));
        assert_eq!(activation.blocked_reason(), Some(&DenyReason::SignInRequired));
        assert_eq!(cx.read(Navigator::current_path), "/menu");
    }
}
