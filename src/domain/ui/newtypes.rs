// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// HideDelay
// =============================================================================

/// Controls auto-hide delay bounds (1 to 30 seconds).
pub mod hide_delay_bounds {
    /// Minimum hide delay in seconds.
    pub const MIN: u32 = 1;
    /// Maximum hide delay in seconds.
    pub const MAX: u32 = 30;
    /// Default hide delay in seconds.
    pub const DEFAULT: u32 = 3;
}

/// Inactivity delay before the player controls hide during playback.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–30 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u32);

impl HideDelay {
    /// Creates a new hide delay, clamping to valid range.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(hide_delay_bounds::MIN, hide_delay_bounds::MAX))
    }

    /// Returns the delay in whole seconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(hide_delay_bounds::DEFAULT)
    }
}
