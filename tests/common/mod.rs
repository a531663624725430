//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use suite_navigator::*;

/// Identity provider answering every query with the same result and counting
/// the queries.
pub struct StaticIdentity {
    result: Result<Identity, IdentityError>,
    calls: Cell<usize>,
}

impl StaticIdentity {
    pub fn signed_in(role: Role) -> Self {
        Self::with(Ok(Identity::new("u-test", role)))
    }

    pub fn signed_out() -> Self {
        Self::with(Err(IdentityError::NoSession))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Err(IdentityError::backend(message)))
    }

    pub fn with(result: Result<Identity, IdentityError>) -> Self {
        Self {
            result,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl IdentityProvider for StaticIdentity {
    async fn current_caller(&self) -> Result<Identity, IdentityError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

/// Route navigator logs to the test output (`RUST_LOG=suite_navigator=debug`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Install a navigation store over a fresh in-memory history at `initial`.
pub fn init_at(cx: &mut gpui::TestAppContext, initial: &str) -> MemoryHistory {
    init_logging();
    let history = MemoryHistory::new(initial);
    let backend = history.clone();
    cx.update(|cx| init_navigation(cx, backend));
    history
}

/// Route table rendered as `matcher → kind` lines, for snapshot assertions.
pub fn route_table_snapshot() -> Vec<String> {
    ROUTE_TABLE
        .iter()
        .map(|entry| match entry.matcher {
            RouteMatcher::Exact(path) => format!("exact {} → {:?}", path, entry.kind),
            RouteMatcher::Prefix(prefix) => format!("prefix {} → {:?}", prefix, entry.kind),
        })
        .collect()
}
