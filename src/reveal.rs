//! Scroll-reveal latch.
//!
//! Feed [`Reveal`] the visible fraction of an element each time the host
//! measures it. It reports whether the element should be shown. With `once`
//! set it latches on the first sighting and asks to stop being observed.

/// Options of a [`Reveal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction (0.0 to 1.0) at which the element counts as seen.
    pub threshold: f32,
    /// Stay visible after the first sighting.
    pub once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            once: true,
        }
    }
}

/// Visibility latch for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    options: RevealOptions,
    visible: bool,
}

impl Reveal {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            visible: false,
        }
    }

    /// Record a new intersection ratio. Returns the visibility afterwards.
    pub fn observe(&mut self, ratio: f32) -> bool {
        if self.visible && self.options.once {
            return true;
        }
        self.visible = ratio > 0.0 && ratio >= self.options.threshold;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `false` once a `once` latch has fired.
    pub fn wants_observation(&self) -> bool {
        !(self.visible && self.options.once)
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new(RevealOptions::default())
    }
}
