//! Page rendering for the current location.
//!
//! - [`PageBuilders`] maps each [`PageKind`] to a render closure.
//! - [`PageView`] renders the page for the store's current path. Place it
//!   once in the window's root layout.
//! - [`menu_link`] renders a [`MenuItem`] that runs the auth gate on click.
//! - [`access_placeholder`] is what a gated page shows while its access
//!   check is in flight or after it was denied.

use crate::auth::{AccessState, AuthStatus, DenyReason};
use crate::context::NavigationStore;
use crate::menu::{activate_menu_item, MenuActivation, MenuItem};
use crate::routes::{PageKind, PageMatch};
use crate::{debug_log, trace_log};
use gpui::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Render closure for one page kind.
pub type PageBuilder = Arc<dyn Fn(&mut App, &PageMatch) -> AnyElement + Send + Sync>;

// ============================================================================
// PageBuilders
// ============================================================================

/// Registry of page render closures.
///
/// Pages without a builder render with the [`PageKind::Home`] builder, the
/// same way unknown paths dispatch to the home page. With no builders at all
/// the view is empty.
///
/// ```ignore
/// let builders = PageBuilders::new()
///     .on(PageKind::Home, |_, _| div().child("Welcome").into_any_element())
///     .on(PageKind::RoomDetail, |_, m| {
///         div().child(format!("Room {}", m.page)).into_any_element()
///     });
/// ```
#[derive(Clone, Default)]
pub struct PageBuilders {
    builders: HashMap<PageKind, PageBuilder>,
}

impl PageBuilders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the builder for `kind`, replacing any previous one.
    pub fn on<F>(mut self, kind: PageKind, builder: F) -> Self
    where
        F: Fn(&mut App, &PageMatch) -> AnyElement + Send + Sync + 'static,
    {
        self.builders.insert(kind, Arc::new(builder));
        self
    }

    pub fn has(&self, kind: PageKind) -> bool {
        self.builders.contains_key(&kind)
    }

    /// The builder that renders `kind`, after the home fallback.
    fn builder_for(&self, kind: PageKind) -> Option<&PageBuilder> {
        self.builders
            .get(&kind)
            .or_else(|| self.builders.get(&PageKind::Home))
    }

    /// Render `page`.
    pub fn render(&self, cx: &mut App, page: &PageMatch) -> AnyElement {
        match self.builder_for(page.page.kind()) {
            Some(builder) => {
                trace_log!("rendering {} for '{}'", page.page, page.source_path);
                builder(cx, page)
            }
            None => {
                debug_log!("no page builder for {}; rendering nothing", page.page);
                div().into_any_element()
            }
        }
    }
}

impl std::fmt::Debug for PageBuilders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.builders.keys().collect();
        kinds.sort();
        f.debug_struct("PageBuilders").field("kinds", &kinds).finish()
    }
}

// ============================================================================
// PageView
// ============================================================================

/// Renders the page for the current location.
pub struct PageView {
    builders: PageBuilders,
}

impl PageView {
    pub fn new(builders: PageBuilders) -> Self {
        Self { builders }
    }
}

impl Render for PageView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let Some(page) = cx
            .try_global::<NavigationStore>()
            .map(NavigationStore::current_page)
        else {
            return div().child("No navigation store configured").into_any_element();
        };
        self.builders.render(cx, &page)
    }
}

// ============================================================================
// Access placeholders
// ============================================================================

/// What a gated page shows instead of its content, if anything.
///
/// `Unchecked` and `Checking` render a neutral loading state, `Denied` the
/// reason. `Allowed` returns `None`: render the page.
pub fn access_placeholder(state: AccessState) -> Option<AnyElement> {
    match state {
        AccessState::Allowed => None,
        AccessState::Unchecked | AccessState::Checking => Some(loading_page().into_any_element()),
        AccessState::Denied(reason) => Some(denied_page(&reason).into_any_element()),
    }
}

fn loading_page() -> impl IntoElement {
    div()
        .flex()
        .items_center()
        .justify_center()
        .size_full()
        .child(div().text_sm().text_color(rgb(0x888888)).child("Loading..."))
}

fn denied_page(reason: &DenyReason) -> impl IntoElement {
    div()
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .size_full()
        .p_8()
        .child(
            div()
                .text_base()
                .font_weight(FontWeight::MEDIUM)
                .text_color(rgb(0x333333))
                .child(reason.to_string()),
        )
}

// ============================================================================
// menu_link
// ============================================================================

/// A clickable menu entry.
///
/// Highlighted when it leads to the current path. On click the auth gate is
/// consulted with `status`; a blocked click calls `on_blocked` with the
/// reason and does not navigate.
pub fn menu_link<V: 'static>(
    cx: &mut Context<'_, V>,
    item: &MenuItem,
    status: AuthStatus,
    on_blocked: impl Fn(&DenyReason, &mut App) + 'static,
) -> Div {
    let is_active = cx
        .try_global::<NavigationStore>()
        .is_some_and(|store| item.is_active(store.current_path()));
    let title = SharedString::from(item.title.clone());
    let item = item.clone();

    div()
        .cursor_pointer()
        .text_color(if is_active {
            rgb(0x2196f3)
        } else {
            rgb(0x333333)
        })
        .child(title)
        .on_mouse_down(
            MouseButton::Left,
            cx.listener(move |_view, _event, _window, cx| {
                if let MenuActivation::Blocked(reason) = activate_menu_item(cx, &item, &status) {
                    on_blocked(&reason, cx);
                }
            }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::prelude::v1::test;
    use crate::routes::{dispatch, Page};
    use std::sync::Mutex;

    fn recording(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> PageBuilders {
        let log = Arc::clone(log);
        PageBuilders::new().on(PageKind::Home, move |_, page| {
            log.lock().unwrap().push(format!("{}:{}", label, page.page));
            div().into_any_element()
        })
    }

    #[gpui::test]
    fn test_unregistered_kind_uses_home_builder(cx: &mut TestAppContext) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let builders = recording(&log, "home");
        assert!(!builders.has(PageKind::About));

        cx.update(|cx| {
            builders.render(cx, &dispatch("/about"));
        });
        assert_eq!(*log.lock().unwrap(), vec!["home:About".to_string()]);
    }

    #[gpui::test]
    fn test_registered_builder_receives_match(cx: &mut TestAppContext) {
        let seen = Arc::new(Mutex::new(None));
        let builders = {
            let seen = Arc::clone(&seen);
            PageBuilders::new().on(PageKind::RoomDetail, move |_, page| {
                *seen.lock().unwrap() = Some(page.clone());
                div().into_any_element()
            })
        };

        cx.update(|cx| {
            builders.render(cx, &dispatch("/rooms/b-12/"));
        });
        let seen = seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.page, Page::room_detail("b-12"));
        assert_eq!(seen.source_path, "/rooms/b-12");
    }

    #[gpui::test]
    fn test_empty_registry_renders_nothing(cx: &mut TestAppContext) {
        let builders = PageBuilders::new();
        cx.update(|cx| {
            builders.render(cx, &dispatch("/"));
        });
    }

    #[test]
    fn test_access_placeholder() {
        assert!(access_placeholder(AccessState::Allowed).is_none());
        assert!(access_placeholder(AccessState::Checking).is_some());
        assert!(access_placeholder(AccessState::Denied(DenyReason::SignInRequired)).is_some());
    }

    #[test]
    fn test_builders_debug_lists_kinds() {
        let builders = PageBuilders::new()
            .on(PageKind::News, |_, _| div().into_any_element())
            .on(PageKind::Home, |_, _| div().into_any_element());
        assert_eq!(
            format!("{:?}", builders),
            "PageBuilders { kinds: [Home, News] }"
        );
    }
}
