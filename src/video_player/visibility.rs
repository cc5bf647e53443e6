// SPDX-License-Identifier: MPL-2.0
//! Controls visibility automaton.
//!
//! The controls are either `Visible` or `Hidden`. Activity always shows them
//! and, while playing, arms a single-shot hide timer. Timers are identified
//! by a [`TimerToken`]; arming a new timer, pausing, or disposing the
//! automaton invalidates every token handed out before, so a late fire is
//! simply ignored.

use crate::domain::ui::HideDelay;
use std::time::Duration;

/// Identifies one armed hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Request to fire [`ControlsVisibility::timer_fired`] with `token` after `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideTimer {
    pub token: TimerToken,
    pub after: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Default)]
pub struct ControlsVisibility {
    state: Visibility,
    generation: u64,
    delay: HideDelay,
    disposed: bool,
}

impl ControlsVisibility {
    #[must_use]
    pub fn new(delay: HideDelay) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state == Visibility::Visible
    }

    #[must_use]
    pub fn state(&self) -> Visibility {
        self.state
    }

    #[must_use]
    pub fn delay(&self) -> HideDelay {
        self.delay
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Token carried by the most recently armed timer.
    #[must_use]
    pub fn current_token(&self) -> TimerToken {
        TimerToken(self.generation)
    }

    /// Records pointer, touch, or command activity.
    ///
    /// Shows the controls and, if playing, returns the timer to arm.
    pub fn activity(&mut self, is_playing: bool) -> Option<HideTimer> {
        if self.disposed {
            return None;
        }
        self.state = Visibility::Visible;
        self.rearm(is_playing)
    }

    /// Reacts to a change of the intended play state.
    ///
    /// Pausing shows the controls and cancels the pending timer; resuming
    /// arms a fresh one.
    pub fn playing_changed(&mut self, is_playing: bool) -> Option<HideTimer> {
        self.activity(is_playing)
    }

    /// Applies a timer fire. Returns true if the controls became hidden.
    pub fn timer_fired(&mut self, token: TimerToken, is_playing: bool) -> bool {
        if self.disposed || token != TimerToken(self.generation) || !is_playing {
            return false;
        }
        let changed = self.state == Visibility::Visible;
        self.state = Visibility::Hidden;
        changed
    }

    /// Invalidates all pending timers permanently.
    pub fn dispose(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.disposed = true;
    }

    fn rearm(&mut self, is_playing: bool) -> Option<HideTimer> {
        self.generation = self.generation.wrapping_add(1);
        is_playing.then(|| HideTimer {
            token: TimerToken(self.generation),
            after: self.delay.as_duration(),
        })
    }
}
