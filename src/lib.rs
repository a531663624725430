//! # suite-navigator
//!
//! Client-side navigation for the Student Suite hostel front end, on GPUI.
//!
//! ```text
//! back/forward ──▶ HistoryBridge ──▶ NavigationStore ──▶ dispatch ──▶ Page
//!                        ▲                 │                          │
//!          Navigator::push ────────────────┘                AuthGate / PageAccess
//! ```
//!
//! - **Navigation store** ([`NavigationStore`], [`Navigator`]): the one
//!   current location of the app, stored as a GPUI global.
//! - **History bridge** ([`HistoryBridge`]): records entries in the platform
//!   history, resets the scroll position, and notifies listeners of
//!   back/forward. Degrades to in-memory navigation without a history API.
//! - **Route dispatcher** ([`dispatch`], [`ROUTE_TABLE`]): pure mapping from a
//!   path to a [`Page`]. Unknown paths render the home page.
//! - **Auth gate** ([`AuthGate`], [`PageAccess`]): advisory access checks for
//!   pages and menu entries. Not a security boundary.
//!
//! ## Quick start
//!
//! ```ignore
//! use gpui::*;
//! use suite_navigator::*;
//!
//! fn main() {
//!     Application::new().run(|cx: &mut App| {
//!         init_navigation(cx, MemoryHistory::new("/"));
//!
//!         let builders = PageBuilders::new()
//!             .on(PageKind::Home, |_, _| div().child("Welcome").into_any_element())
//!             .on(PageKind::RoomDetail, |_, m| {
//!                 div().child(format!("{}", m.page)).into_any_element()
//!             });
//!
//!         cx.open_window(WindowOptions::default(), |_, cx| {
//!             cx.new(|_| PageView::new(builders))
//!         })
//!         .unwrap();
//!     });
//! }
//! ```
//!
//! ## Feature flags
//!
//! | Feature   | Default | Enables                                   |
//! |-----------|---------|-------------------------------------------|
//! | `log`     | yes     | logging through the `log` crate           |
//! | `tracing` | no      | logging through the `tracing` crate       |
//! | `effects` | yes     | [`Typewriter`] and [`Reveal`] UI effects  |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod auth;
pub mod context;
pub mod error;
pub mod history;
pub mod logging;
pub mod menu;
pub mod outlet;
pub mod params;
pub mod path;
pub mod routes;
pub mod state;

#[cfg(feature = "effects")]
#[cfg_attr(docsrs, doc(cfg(feature = "effects")))]
pub mod reveal;
#[cfg(feature = "effects")]
#[cfg_attr(docsrs, doc(cfg(feature = "effects")))]
pub mod typewriter;

pub use auth::{
    AccessRequirement, AccessState, AccessTicket, AuthContext, AuthGate, AuthStatus, DenyReason,
    GateDecision, Identity, IdentityProvider, PageAccess, Role,
};
pub use context::{
    init_navigation, init_navigation_with, NavigationOutcome, NavigationStore, Navigator,
    NavigatorOptions, UseNavigation,
};
pub use error::{HistoryError, IdentityError};
pub use history::{
    ChangeCause, HistoryBackend, HistoryBridge, HistoryObservation, LocationChange, MemoryHistory,
    PushOutcome,
};
pub use menu::{
    activate_menu_item, admin_menu, compact_nav, dashboard_menu, primary_nav, MenuActivation,
    MenuItem,
};
pub use outlet::{access_placeholder, menu_link, PageBuilder, PageBuilders, PageView};
pub use params::QueryParams;
pub use path::{normalize_path, Location};
pub use routes::{
    dispatch, Page, PageKind, PageMatch, RouteEntry, RouteMatcher, ROOM_DETAIL_PREFIX, ROUTE_TABLE,
};
pub use state::NavigationState;

#[cfg(feature = "effects")]
pub use reveal::{Reveal, RevealOptions};
#[cfg(feature = "effects")]
pub use typewriter::{Typewriter, TypewriterOptions};
