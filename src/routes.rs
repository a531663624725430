//! Route table and dispatcher.
//!
//! [`dispatch`] turns a path into the [`Page`] to render. It is a pure
//! function over the static, ordered [`ROUTE_TABLE`]:
//!
//! 1. Normalize the path (see [`normalize_path`]).
//! 2. Walk the table in order; the first entry that matches wins. A
//!    [`RouteMatcher::Prefix`] entry hands everything after its prefix to the
//!    page as an opaque identifier, slashes included.
//! 3. If nothing matches, fall back to [`Page::Home`]. The dispatcher never
//!    produces a "not found" page.
//!
//! Legacy paths stay in the table as explicit rows (`/dashboard` next to
//! `/menu`, `/booking` next to `/current-booking`) rather than being inferred,
//! so the table doubles as the navigation contract tests snapshot.
//!
//! # Example
//!
//! ```
//! use suite_navigator::{dispatch, Page};
//!
//! assert_eq!(dispatch("/rooms/17").page, Page::room_detail("17"));
//! assert_eq!(dispatch("/dashboard").page, dispatch("/menu").page);
//! assert_eq!(dispatch("/no-such-page").page, Page::Home);
//! ```

use crate::auth::{AccessRequirement, Role};
use crate::path::normalize_path;
use crate::debug_log;
use std::fmt;

/// How a route entry matches a normalized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatcher {
    /// The whole path equals this string.
    Exact(&'static str),
    /// The path starts with this string; the remainder is the page parameter.
    Prefix(&'static str),
}

impl RouteMatcher {
    /// Match `path` (already normalized). Returns the captured parameter for
    /// prefix matchers, an empty string for exact matchers.
    fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self {
            Self::Exact(expected) => (path == *expected).then_some(""),
            Self::Prefix(prefix) => path.strip_prefix(prefix),
        }
    }
}

/// Page identifier without parameters. Used as the table's target and as the
/// key for page builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageKind {
    Home,
    Rooms,
    RoomDetail,
    CurrentBooking,
    News,
    Dashboard,
    Profile,
    TransportationSurvey,
    AdminBookings,
    About,
    Contact,
}

impl PageKind {
    /// Every page kind, in table order of first appearance.
    pub const ALL: [PageKind; 11] = [
        PageKind::RoomDetail,
        PageKind::Home,
        PageKind::Rooms,
        PageKind::CurrentBooking,
        PageKind::News,
        PageKind::Dashboard,
        PageKind::Profile,
        PageKind::TransportationSurvey,
        PageKind::AdminBookings,
        PageKind::About,
        PageKind::Contact,
    ];
}

/// A page the application can render, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Rooms,
    /// Room detail for the opaque room identifier taken from the path.
    RoomDetail { id: String },
    CurrentBooking,
    News,
    /// The member menu, reachable as `/menu` and legacy `/dashboard`.
    Dashboard,
    Profile,
    TransportationSurvey,
    AdminBookings,
    About,
    Contact,
}

impl Page {
    /// Room detail page for `id`.
    pub fn room_detail(id: impl Into<String>) -> Self {
        Self::RoomDetail { id: id.into() }
    }

    fn from_kind(kind: PageKind, param: &str) -> Self {
        match kind {
            PageKind::Home => Self::Home,
            PageKind::Rooms => Self::Rooms,
            PageKind::RoomDetail => Self::room_detail(param),
            PageKind::CurrentBooking => Self::CurrentBooking,
            PageKind::News => Self::News,
            PageKind::Dashboard => Self::Dashboard,
            PageKind::Profile => Self::Profile,
            PageKind::TransportationSurvey => Self::TransportationSurvey,
            PageKind::AdminBookings => Self::AdminBookings,
            PageKind::About => Self::About,
            PageKind::Contact => Self::Contact,
        }
    }

    /// The parameter-free kind of this page.
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Home => PageKind::Home,
            Self::Rooms => PageKind::Rooms,
            Self::RoomDetail { .. } => PageKind::RoomDetail,
            Self::CurrentBooking => PageKind::CurrentBooking,
            Self::News => PageKind::News,
            Self::Dashboard => PageKind::Dashboard,
            Self::Profile => PageKind::Profile,
            Self::TransportationSurvey => PageKind::TransportationSurvey,
            Self::AdminBookings => PageKind::AdminBookings,
            Self::About => PageKind::About,
            Self::Contact => PageKind::Contact,
        }
    }

    /// The path links should use for this page. Legacy aliases are never
    /// canonical.
    pub fn canonical_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Rooms => "/rooms".to_string(),
            Self::RoomDetail { id } => format!("{}{}", ROOM_DETAIL_PREFIX, id),
            Self::CurrentBooking => "/current-booking".to_string(),
            Self::News => "/news".to_string(),
            Self::Dashboard => "/menu".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::TransportationSurvey => "/admin/transportation".to_string(),
            Self::AdminBookings => "/admin/bookings".to_string(),
            Self::About => "/about".to_string(),
            Self::Contact => "/contact".to_string(),
        }
    }

    /// Who may see this page.
    ///
    /// This is a UX hint for the page and its menus. The backend enforces
    /// the real permissions on every document it serves.
    pub fn access_requirement(&self) -> AccessRequirement {
        match self {
            Self::Profile => AccessRequirement::signed_in(),
            Self::AdminBookings => AccessRequirement::role(Role::Admin).redirect_to("/"),
            Self::TransportationSurvey => {
                AccessRequirement::role(Role::Admin).redirect_to("/dashboard")
            }
            _ => AccessRequirement::public(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoomDetail { id } => write!(f, "RoomDetail({})", id),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub matcher: RouteMatcher,
    pub kind: PageKind,
}

impl RouteEntry {
    const fn exact(path: &'static str, kind: PageKind) -> Self {
        Self {
            matcher: RouteMatcher::Exact(path),
            kind,
        }
    }

    const fn prefix(prefix: &'static str, kind: PageKind) -> Self {
        Self {
            matcher: RouteMatcher::Prefix(prefix),
            kind,
        }
    }
}

/// Reserved prefix of room detail paths.
pub const ROOM_DETAIL_PREFIX: &str = "/rooms/";

/// The application's routes, in match order.
pub static ROUTE_TABLE: &[RouteEntry] = &[
    RouteEntry::prefix(ROOM_DETAIL_PREFIX, PageKind::RoomDetail),
    RouteEntry::exact("/", PageKind::Home),
    RouteEntry::exact("/rooms", PageKind::Rooms),
    RouteEntry::exact("/booking", PageKind::CurrentBooking),
    RouteEntry::exact("/current-booking", PageKind::CurrentBooking),
    RouteEntry::exact("/news", PageKind::News),
    RouteEntry::exact("/menu", PageKind::Dashboard),
    RouteEntry::exact("/dashboard", PageKind::Dashboard),
    RouteEntry::exact("/profile", PageKind::Profile),
    RouteEntry::exact("/admin/transportation", PageKind::TransportationSurvey),
    RouteEntry::exact("/admin/bookings", PageKind::AdminBookings),
    RouteEntry::exact("/about", PageKind::About),
    RouteEntry::exact("/contact", PageKind::Contact),
];

/// Result of dispatching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatch {
    /// The page to render.
    pub page: Page,
    /// The normalized path this page was dispatched from.
    pub source_path: String,
    /// `true` when no table entry matched and the home page was used.
    pub fallback: bool,
}

/// Map a path to the page to render. Pure: no state, no side effects.
pub fn dispatch(path: &str) -> PageMatch {
    let path = normalize_path(path);
    dispatch_in(ROUTE_TABLE, &path)
}

/// Dispatch a normalized path against an arbitrary table.
pub(crate) fn dispatch_in(table: &[RouteEntry], path: &str) -> PageMatch {
    for entry in table {
        if let Some(param) = entry.matcher.capture(path) {
            let page = Page::from_kind(entry.kind, param);
            debug_log!("dispatch '{}' → {} via {:?}", path, page, entry.matcher);
            return PageMatch {
                page,
                source_path: path.to_string(),
                fallback: false,
            };
        }
    }

    debug_log!("dispatch '{}' → Home (fallback)", path);
    PageMatch {
        page: Page::Home,
        source_path: path.to_string(),
        fallback: true,
    }
}
