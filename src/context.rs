//! Navigation store integration for GPUI.
//!
//! The store is the single source of truth for "where is the user now". It
//! lives in the app as a GPUI `Global`, so any page or menu can read or change
//! the current location through `cx` without threading it through props.
//!
//! - [`NavigationStore`] owns the [`NavigationState`] and the
//!   [`HistoryBridge`]. App-initiated navigation and user back/forward both go
//!   through one private update routine.
//! - [`Navigator`] is the static convenience API (`Navigator::push`,
//!   `Navigator::back`, ...) over the store.
//! - [`UseNavigation`] gives direct access to the store from `App`.
//!
//! # Initialization
//!
//! Call [`init_navigation`] once at startup. Using the store before that is a
//! programming error and panics:
//!
//! ```ignore
//! use suite_navigator::{init_navigation, MemoryHistory, Navigator};
//!
//! init_navigation(cx, MemoryHistory::new("/"));
//! Navigator::push(cx, "/rooms/17");
//! ```

use crate::history::{
    ChangeCause, HistoryBackend, HistoryBridge, HistoryObservation, LocationChange,
};
use crate::path::Location;
use crate::routes::{dispatch, PageMatch};
use crate::state::NavigationState;
use crate::{debug_log, error_log, info_log, warn_log};
use gpui::{App, BorrowAppContext, Global};

// ============================================================================
// NavigatorOptions
// ============================================================================

/// Startup options for the navigation store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorOptions {
    /// Location to start at. When unset, the history backend's current
    /// location is used, falling back to `/`.
    pub initial_path: Option<String>,
}

impl NavigatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `path` instead of the platform's location.
    #[must_use]
    pub fn initial_path(mut self, path: impl Into<String>) -> Self {
        self.initial_path = Some(path.into());
        self
    }
}

// ============================================================================
// NavigationOutcome
// ============================================================================

/// What a navigation did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The current location changed.
    Navigated {
        from: Location,
        to: Location,
        navigation_id: usize,
    },
    /// The target was already current; nothing changed.
    Unchanged { path: String },
}

impl NavigationOutcome {
    pub fn is_navigated(&self) -> bool {
        matches!(self, Self::Navigated { .. })
    }

    /// Path current after the navigation.
    pub fn path(&self) -> &str {
        match self {
            Self::Navigated { to, .. } => to.path(),
            Self::Unchanged { path } => path,
        }
    }
}

// ============================================================================
// NavigationStore
// ============================================================================

/// Process-wide navigation state, stored as a GPUI global.
#[derive(Debug)]
pub struct NavigationStore {
    state: NavigationState,
    bridge: HistoryBridge,
}

impl NavigationStore {
    /// Create a store over `bridge`.
    pub fn new(bridge: HistoryBridge, options: NavigatorOptions) -> Self {
        let initial = options
            .initial_path
            .or_else(|| bridge.platform_location())
            .map_or_else(Location::root, Location::from);
        Self {
            state: NavigationState::new(initial),
            bridge,
        }
    }

    /// Navigate to `target`: normalize it, record a history entry, update the
    /// current location.
    ///
    /// Navigating to the current location adds no history entry and leaves
    /// the navigation ID alone, but still resets the scroll position.
    pub fn navigate(&mut self, target: impl Into<Location>) -> NavigationOutcome {
        let target = target.into();
        self.bridge.push(&target, self.state.location());
        self.apply(target, ChangeCause::Push)
    }

    /// Apply a back/forward change the platform reported for `url`.
    pub fn handle_pop(&mut self, url: &str) -> NavigationOutcome {
        let location = Location::parse(url);
        self.bridge.sync(&location);
        self.apply(location, ChangeCause::Pop)
    }

    /// Go back one history entry. `None` if there is nothing to go back to.
    pub fn back(&mut self) -> Option<NavigationOutcome> {
        let location = self.bridge.back()?;
        Some(self.apply(location, ChangeCause::Pop))
    }

    /// Go forward one history entry. `None` if there is nothing ahead.
    pub fn forward(&mut self) -> Option<NavigationOutcome> {
        let location = self.bridge.forward()?;
        Some(self.apply(location, ChangeCause::Pop))
    }

    /// Current normalized path.
    pub fn current_path(&self) -> &str {
        self.state.current_path()
    }

    pub fn location(&self) -> &Location {
        self.state.location()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn navigation_id(&self) -> usize {
        self.state.navigation_id()
    }

    /// Dispatch the current path.
    pub fn current_page(&self) -> PageMatch {
        dispatch(self.state.current_path())
    }

    pub fn bridge(&self) -> &HistoryBridge {
        &self.bridge
    }

    /// Register a location-change listener under `key`. See
    /// [`HistoryBridge::observe`].
    pub fn observe(
        &self,
        key: impl Into<String>,
        on_change: impl Fn(&LocationChange) + 'static,
    ) -> HistoryObservation {
        self.bridge.observe(key, on_change)
    }

    /// The one state-update routine for pushes and pops alike.
    fn apply(&mut self, location: Location, cause: ChangeCause) -> NavigationOutcome {
        let from = self.state.location().clone();
        let Some(navigation_id) = self.state.apply(location) else {
            debug_log!("'{}' is already current", from);
            return NavigationOutcome::Unchanged {
                path: from.path().to_string(),
            };
        };

        let to = self.state.location().clone();
        info_log!("navigated {} → {} ({:?}, #{})", from, to, cause, navigation_id);
        self.bridge.emit(&LocationChange {
            from: from.clone(),
            to: to.clone(),
            cause,
            navigation_id,
        });
        NavigationOutcome::Navigated {
            from,
            to,
            navigation_id,
        }
    }
}

impl Global for NavigationStore {}

// ============================================================================
// UseNavigation trait
// ============================================================================

const NOT_INITIALIZED: &str =
    "navigation store is not initialized; call init_navigation before navigating";

fn ensure_initialized(cx: &App) {
    if !cx.has_global::<NavigationStore>() {
        error_log!("{}", NOT_INITIALIZED);
        panic!("{}", NOT_INITIALIZED);
    }
}

/// Access to the navigation store from context.
///
/// # Panics
///
/// Both methods panic if [`init_navigation`] has not been called.
pub trait UseNavigation {
    /// Get reference to the navigation store.
    fn navigation(&self) -> &NavigationStore;

    /// Update the navigation store.
    fn update_navigation<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut NavigationStore, &mut App) -> R;
}

impl UseNavigation for App {
    fn navigation(&self) -> &NavigationStore {
        ensure_initialized(self);
        self.global::<NavigationStore>()
    }

    fn update_navigation<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut NavigationStore, &mut App) -> R,
    {
        ensure_initialized(self);
        self.update_global(f)
    }
}

// ============================================================================
// init_navigation
// ============================================================================

/// Initialize the navigation store over a history backend.
pub fn init_navigation(cx: &mut App, backend: impl HistoryBackend) {
    init_navigation_with(cx, HistoryBridge::new(backend), NavigatorOptions::default());
}

/// Initialize the navigation store with an explicit bridge and options.
///
/// Pass [`HistoryBridge::detached`] on hosts without a history API.
pub fn init_navigation_with(cx: &mut App, bridge: HistoryBridge, options: NavigatorOptions) {
    if cx.has_global::<NavigationStore>() {
        warn_log!("init_navigation called twice; replacing the navigation store");
    }
    let store = NavigationStore::new(bridge, options);
    info_log!(
        "navigation store initialized at '{}' (history {})",
        store.location(),
        if store.bridge().is_available() {
            "available"
        } else {
            "unavailable"
        }
    );
    cx.set_global(store);
}

// ============================================================================
// Navigator
// ============================================================================

/// Navigation API over the global store.
///
/// ```ignore
/// use suite_navigator::Navigator;
///
/// Navigator::push(cx, "/rooms/17");
/// Navigator::back(cx);
/// let path = Navigator::current_path(cx);
/// ```
pub struct Navigator;

impl Navigator {
    /// Navigate to `path` and refresh all windows.
    pub fn push(cx: &mut App, path: impl Into<String>) -> NavigationOutcome {
        let path = path.into();
        debug_log!("Navigator::push '{}'", path);
        let outcome = cx.update_navigation(|store, _| store.navigate(path));
        cx.refresh_windows();
        outcome
    }

    /// Go back one entry.
    pub fn back(cx: &mut App) -> Option<NavigationOutcome> {
        let outcome = cx.update_navigation(|store, _| store.back());
        cx.refresh_windows();
        outcome
    }

    /// Go forward one entry.
    pub fn forward(cx: &mut App) -> Option<NavigationOutcome> {
        let outcome = cx.update_navigation(|store, _| store.forward());
        cx.refresh_windows();
        outcome
    }

    /// Apply a platform back/forward notification for `url`.
    pub fn pop_to(cx: &mut App, url: &str) -> NavigationOutcome {
        let outcome = cx.update_navigation(|store, _| store.handle_pop(url));
        cx.refresh_windows();
        outcome
    }

    /// Get current path.
    pub fn current_path(cx: &App) -> String {
        cx.navigation().current_path().to_string()
    }

    /// Current path, or `None` before [`init_navigation`].
    pub fn try_current_path(cx: &App) -> Option<String> {
        cx.has_global::<NavigationStore>()
            .then(|| cx.global::<NavigationStore>().current_path().to_string())
    }

    /// Current location including its query.
    pub fn location(cx: &App) -> Location {
        cx.navigation().location().clone()
    }

    /// Dispatch the current path.
    pub fn current_page(cx: &App) -> PageMatch {
        cx.navigation().current_page()
    }

    pub fn navigation_id(cx: &App) -> usize {
        cx.navigation().navigation_id()
    }

    /// Register a location-change listener. See [`HistoryBridge::observe`].
    pub fn observe(
        cx: &App,
        key: impl Into<String>,
        on_change: impl Fn(&LocationChange) + 'static,
    ) -> HistoryObservation {
        cx.navigation().observe(key, on_change)
    }
}

// ============================================================================
// Tests
// ============================================================================
