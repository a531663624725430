//! History bridge: the platform's back/forward primitive.
//!
//! The bridge wraps a [`HistoryBackend`] (browser history, an in-process
//! stack, or nothing at all) and gives the navigation store two things:
//!
//! - [`HistoryBridge::push`] records a new entry without reloading and
//!   resets the viewport scroll position to the top.
//! - [`HistoryBridge::observe`] registers a listener for location changes.
//!   Each registration returns a [`HistoryObservation`] guard that
//!   unregisters on drop, so remounting components never leak listeners.
//!   Registering the same key twice replaces the earlier listener.
//!
//! App-initiated pushes and user back/forward both end up in the store's one
//! update routine, which emits the resulting [`LocationChange`] to listeners.
//!
//! # Without a history API
//!
//! A [`detached`](HistoryBridge::detached) bridge (or a backend whose
//! `push_state` fails) degrades to in-memory navigation: `push` never fails,
//! the failure is logged once, and `observe` hands back an inert guard.
//!
//! # Example
//!
//! ```
//! use suite_navigator::{HistoryBridge, MemoryHistory, Location};
//!
//! let history = MemoryHistory::new("/");
//! let mut bridge = HistoryBridge::new(history.clone());
//!
//! let recorded = bridge.push(&Location::parse("/rooms"), &Location::root());
//! assert!(recorded.is_recorded());
//! assert_eq!(history.entries(), vec!["/", "/rooms"]);
//! assert_eq!(history.scroll_resets(), 1);
//! ```

use crate::error::HistoryError;
use crate::path::Location;
use crate::{debug_log, trace_log, warn_log};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

// ============================================================================
// HistoryBackend
// ============================================================================

/// The platform history primitive.
///
/// Implementations adapt the host's session history (e.g. the browser's
/// `history.pushState` and `popstate`). [`MemoryHistory`] is the in-process
/// implementation.
pub trait HistoryBackend: 'static {
    /// URL of the current entry as the platform sees it.
    fn location(&self) -> Option<String>;

    /// Record a new entry at `url` without reloading the document.
    fn push_state(&mut self, url: &str) -> Result<(), HistoryError>;

    /// Reset the viewport scroll position to the top.
    fn scroll_to_top(&mut self);

    /// Step back one entry, returning the URL now current.
    fn go_back(&mut self) -> Option<String> {
        None
    }

    /// Step forward one entry, returning the URL now current.
    fn go_forward(&mut self) -> Option<String> {
        None
    }

    /// The platform reported a back/forward move to `url`. Backends whose
    /// platform has already moved its own cursor leave this as a no-op.
    fn sync_to(&mut self, _url: &str) {}
}

// ============================================================================
// MemoryHistory
// ============================================================================

#[derive(Debug)]
struct MemoryHistoryInner {
    entries: Vec<String>,
    current: usize,
    scroll_resets: usize,
}

/// In-process session history.
///
/// Behaves like a browser's history stack: pushing truncates forward
/// entries, back/forward move a cursor. Clones share the same stack, so a
/// host (or a test) can keep a handle after giving one to the bridge.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<MemoryHistoryInner>>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryHistoryInner {
                entries: vec![initial.into()],
                current: 0,
                scroll_resets: 0,
            })),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.clone()
    }

    /// Index of the current entry.
    pub fn position(&self) -> usize {
        self.inner.borrow().current
    }

    /// URL of the current entry.
    pub fn current(&self) -> String {
        let inner = self.inner.borrow();
        inner.entries[inner.current].clone()
    }

    /// How many times the viewport was scrolled back to the top.
    pub fn scroll_resets(&self) -> usize {
        self.inner.borrow().scroll_resets
    }

    pub fn can_go_back(&self) -> bool {
        self.inner.borrow().current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let inner = self.inner.borrow();
        inner.current + 1 < inner.entries.len()
    }
}

impl HistoryBackend for MemoryHistory {
    fn location(&self) -> Option<String> {
        Some(self.current())
    }

    fn push_state(&mut self, url: &str) -> Result<(), HistoryError> {
        let mut inner = self.inner.borrow_mut();
        let keep = inner.current + 1;
        inner.entries.truncate(keep);
        inner.entries.push(url.to_string());
        inner.current += 1;
        Ok(())
    }

    fn scroll_to_top(&mut self) {
        self.inner.borrow_mut().scroll_resets += 1;
    }

    fn go_back(&mut self) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if inner.current == 0 {
            return None;
        }
        inner.current -= 1;
        Some(inner.entries[inner.current].clone())
    }

    fn go_forward(&mut self) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if inner.current + 1 >= inner.entries.len() {
            return None;
        }
        inner.current += 1;
        Some(inner.entries[inner.current].clone())
    }

    /// Move the cursor to the entry for `url` nearest the current one.
    fn sync_to(&mut self, url: &str) {
        let target = Location::parse(url);
        let mut inner = self.inner.borrow_mut();
        let current = inner.current;
        let nearest = inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| Location::parse(entry) == target)
            .min_by_key(|(index, _)| index.abs_diff(current))
            .map(|(index, _)| index);
        match nearest {
            Some(index) => inner.current = index,
            None => debug_log!("'{}' is not in memory history; cursor left at {}", url, current),
        }
    }
}

// ============================================================================
// LocationChange
// ============================================================================

/// What caused a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// The application called `navigate`.
    Push,
    /// The user went back or forward.
    Pop,
}

/// A change of the current location, as delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    pub from: Location,
    pub to: Location,
    pub cause: ChangeCause,
    pub navigation_id: usize,
}

/// What [`HistoryBridge::push`] did with the platform history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new entry was recorded.
    Recorded,
    /// The target is already current; no entry was added.
    Collapsed,
    /// No usable history API; navigation is in memory only.
    InMemory,
}

impl PushOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

// ============================================================================
// Listener registry
// ============================================================================

type Listener = Rc<dyn Fn(&LocationChange)>;

struct ListenerEntry {
    key: String,
    id: u64,
    callback: Listener,
}

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    fn register(&mut self, key: String, callback: Listener) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            debug_log!("replacing history listener '{}'", key);
            existing.id = id;
            existing.callback = callback;
        } else {
            debug_log!("registered history listener '{}'", key);
            self.entries.push(ListenerEntry { key, id, callback });
        }
        id
    }

    fn unregister(&mut self, id: u64) {
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            let entry = self.entries.remove(pos);
            debug_log!("unregistered history listener '{}'", entry.key);
        }
    }

    fn snapshot(&self) -> Vec<(String, Listener)> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), Rc::clone(&e.callback)))
            .collect()
    }
}

/// Guard for a registered history listener. Dropping it unregisters the
/// listener.
#[must_use = "dropping the observation unregisters the listener"]
pub struct HistoryObservation {
    registry: Weak<RefCell<ListenerRegistry>>,
    id: u64,
}

impl HistoryObservation {
    fn inert() -> Self {
        Self {
            registry: Weak::new(),
            id: 0,
        }
    }

    /// `true` while the listener is registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().entries.iter().any(|e| e.id == self.id))
    }

    /// Keep the listener registered for the bridge's lifetime.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }
}

impl Drop for HistoryObservation {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(self.id);
        }
    }
}

impl fmt::Debug for HistoryObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryObservation")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// ============================================================================
// HistoryBridge
// ============================================================================

/// Adapter between the platform history primitive and the navigation store.
pub struct HistoryBridge {
    backend: Option<Box<dyn HistoryBackend>>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    warned_unavailable: bool,
}

impl HistoryBridge {
    /// Bridge over a platform history backend.
    pub fn new(backend: impl HistoryBackend) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            listeners: Rc::default(),
            warned_unavailable: false,
        }
    }

    /// Bridge for hosts without a history API.
    pub fn detached() -> Self {
        Self {
            backend: None,
            listeners: Rc::default(),
            warned_unavailable: false,
        }
    }

    /// `true` if a history backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// URL of the platform's current entry, if there is a platform.
    pub fn platform_location(&self) -> Option<String> {
        self.backend.as_ref().and_then(|backend| backend.location())
    }

    /// Register `on_change` under `key`.
    ///
    /// Registering an existing key replaces its listener. Without a history
    /// backend this is a no-op and the returned guard is inert.
    pub fn observe(
        &self,
        key: impl Into<String>,
        on_change: impl Fn(&LocationChange) + 'static,
    ) -> HistoryObservation {
        if self.backend.is_none() {
            debug_log!("history unavailable; observe is a no-op");
            return HistoryObservation::inert();
        }
        let id = self
            .listeners
            .borrow_mut()
            .register(key.into(), Rc::new(on_change));
        HistoryObservation {
            registry: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Record `target` as a new history entry and reset the scroll position.
    ///
    /// When `target` equals `current` no entry is added (the scroll position
    /// is still reset). Never fails: without a working history API the
    /// navigation proceeds in memory.
    pub fn push(&mut self, target: &Location, current: &Location) -> PushOutcome {
        let Some(backend) = self.backend.as_mut() else {
            if !self.warned_unavailable {
                warn_log!("{}; navigating in memory only", HistoryError::Unavailable);
                self.warned_unavailable = true;
            }
            return PushOutcome::InMemory;
        };

        let outcome = if target == current {
            debug_log!("'{}' is already current; not pushing a duplicate entry", target);
            PushOutcome::Collapsed
        } else {
            match backend.push_state(&target.to_url()) {
                Ok(()) => PushOutcome::Recorded,
                Err(err) => {
                    if !self.warned_unavailable {
                        warn_log!("history push failed, navigating in memory only: {}", err);
                        self.warned_unavailable = true;
                    }
                    PushOutcome::InMemory
                }
            }
        };
        backend.scroll_to_top();
        outcome
    }

    /// Bring the backend in line with a back/forward move to `location`
    /// reported by the platform.
    pub fn sync(&mut self, location: &Location) {
        if let Some(backend) = self.backend.as_mut() {
            backend.sync_to(&location.to_url());
        }
    }

    /// Step back. Returns the location now current, if any.
    pub fn back(&mut self) -> Option<Location> {
        self.backend
            .as_mut()?
            .go_back()
            .map(|url| Location::parse(&url))
    }

    /// Step forward. Returns the location now current, if any.
    pub fn forward(&mut self) -> Option<Location> {
        self.backend
            .as_mut()?
            .go_forward()
            .map(|url| Location::parse(&url))
    }

    /// Deliver `change` to every listener.
    pub(crate) fn emit(&self, change: &LocationChange) {
        // Snapshot first so a listener may drop its own observation.
        let listeners = self.listeners.borrow().snapshot();
        for (key, listener) in listeners {
            trace_log!("history listener '{}' ← {}", key, change.to);
            listener(change);
        }
    }
}

impl fmt::Debug for HistoryBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBridge")
            .field("available", &self.is_available())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
