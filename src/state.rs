//! Navigation state

use crate::path::Location;

/// Where the user is now.
///
/// Holds the current [`Location`] and a navigation counter. The counter
/// increments on every applied change, so work started for one navigation
/// (an auth check, say) can tell it has been overtaken by a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    location: Location,
    navigation_id: usize,
}

impl NavigationState {
    /// Create a state positioned at `initial`.
    pub fn new(initial: impl Into<Location>) -> Self {
        Self {
            location: initial.into(),
            navigation_id: 0,
        }
    }

    /// Current normalized path.
    pub fn current_path(&self) -> &str {
        self.location.path()
    }

    /// Current location including its query.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// ID of the navigation that produced the current location.
    pub fn navigation_id(&self) -> usize {
        self.navigation_id
    }

    /// Check if `nav_id` still names the current navigation.
    pub fn is_navigation_current(&self, nav_id: usize) -> bool {
        self.navigation_id == nav_id
    }

    /// Move to `location`, returning the new navigation ID.
    ///
    /// Returns `None` and leaves the state alone when `location` is already
    /// current.
    pub(crate) fn apply(&mut self, location: Location) -> Option<usize> {
        if location == self.location {
            return None;
        }
        self.location = location;
        self.navigation_id += 1;
        Some(self.navigation_id)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bumps_navigation_id() {
        let mut state = NavigationState::default();
        assert_eq!(state.current_path(), "/");
        assert_eq!(state.navigation_id(), 0);

        assert_eq!(state.apply(Location::parse("/rooms")), Some(1));
        assert_eq!(state.current_path(), "/rooms");
        assert!(state.is_navigation_current(1));
        assert!(!state.is_navigation_current(0));
    }

    #[test]
    fn test_apply_same_location_is_noop() {
        let mut state = NavigationState::new("/news");
        assert_eq!(state.apply(Location::parse("/news/")), None);
        assert_eq!(state.navigation_id(), 0);
    }

    #[test]
    fn test_query_change_is_a_navigation() {
        let mut state = NavigationState::new("/booking");
        assert_eq!(state.apply(Location::parse("/booking?room=17")), Some(1));
        assert_eq!(state.current_path(), "/booking");
        assert_eq!(state.location().query().get("room"), Some("17"));
    }
}
