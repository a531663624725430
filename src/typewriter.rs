//! Typewriter text effect.
//!
//! [`Typewriter`] cycles through a list of words, typing each one character
//! at a time, holding it, then deleting it before moving on. It owns no
//! timer: the host calls [`advance`](Typewriter::advance), renders
//! [`text`](Typewriter::text), and schedules the next call after the
//! returned delay.
//!
//! ```
//! use std::time::Duration;
//! use suite_navigator::{Typewriter, TypewriterOptions};
//!
//! let mut tw = Typewriter::new(["Hi"], TypewriterOptions::default());
//! assert_eq!(tw.advance(), Duration::from_millis(70));
//! assert_eq!(tw.text(), "H");
//! assert_eq!(tw.advance(), Duration::from_millis(1800));
//! assert_eq!(tw.text(), "Hi");
//! ```

use crate::trace_log;
use std::time::Duration;

/// Timing of a [`Typewriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterOptions {
    /// Delay between typed characters.
    pub typing_speed: Duration,
    /// Delay between deleted characters.
    pub deleting_speed: Duration,
    /// How long a fully typed word stays up.
    pub pause: Duration,
    /// Start over after the last word. When `false` the last word stays.
    pub looping: bool,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(70),
            deleting_speed: Duration::from_millis(40),
            pause: Duration::from_millis(1800),
            looping: true,
        }
    }
}

impl TypewriterOptions {
    #[must_use]
    pub fn typing_speed(mut self, speed: Duration) -> Self {
        self.typing_speed = speed;
        self
    }

    #[must_use]
    pub fn deleting_speed(mut self, speed: Duration) -> Self {
        self.deleting_speed = speed;
        self
    }

    #[must_use]
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
    Finished,
}

/// Typewriter state machine.
#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<Vec<char>>,
    options: TypewriterOptions,
    index: usize,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    pub fn new<I, S>(words: I, options: TypewriterOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Vec<char>> = words
            .into_iter()
            .map(|word| word.as_ref().chars().collect())
            .collect();
        let phase = if words.is_empty() {
            Phase::Finished
        } else {
            Phase::Typing
        };
        Self {
            words,
            options,
            index: 0,
            shown: 0,
            phase,
        }
    }

    /// Text to display right now.
    pub fn text(&self) -> String {
        self.words
            .get(self.index)
            .map(|word| word[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    /// Index of the word being typed.
    pub fn word_index(&self) -> usize {
        self.index
    }

    /// `true` once a non-looping typewriter has settled on its last word, or
    /// when there are no words.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Take one step. Returns the delay until the next step.
    pub fn advance(&mut self) -> Duration {
        match self.phase {
            Phase::Finished => self.options.pause,
            Phase::Typing => {
                let len = self.words[self.index].len();
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown < len {
                    return self.options.typing_speed;
                }
                let last = self.index + 1 == self.words.len();
                self.phase = if last && !self.options.looping {
                    trace_log!("typewriter finished on word {}", self.index);
                    Phase::Finished
                } else {
                    Phase::Holding
                };
                self.options.pause
            }
            Phase::Holding => {
                self.phase = Phase::Deleting;
                self.delete_one()
            }
            Phase::Deleting => self.delete_one(),
        }
    }

    fn delete_one(&mut self) -> Duration {
        self.shown = self.shown.saturating_sub(1);
        if self.shown > 0 {
            return self.options.deleting_speed;
        }
        self.index = (self.index + 1) % self.words.len();
        self.phase = Phase::Typing;
        self.options.typing_speed
    }
}
