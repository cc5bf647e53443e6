// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Controls**: Auto-hide delay of the player controls
//! - **Volume**: Audio playback volume settings
//! - **Seek**: Relative seek step for skip buttons and arrow keys
//! - **Engine**: Timing of engine polling and quality refreshes

use crate::domain::ui::newtypes::hide_delay_bounds;
use crate::domain::video::newtypes::{seek_step_bounds, volume_bounds};
use std::time::Duration;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default inactivity delay before controls hide during playback (seconds).
pub const DEFAULT_HIDE_DELAY_SECS: u32 = hide_delay_bounds::DEFAULT;

/// Minimum hide delay (seconds).
pub const MIN_HIDE_DELAY_SECS: u32 = hide_delay_bounds::MIN;

/// Maximum hide delay (seconds).
pub const MAX_HIDE_DELAY_SECS: u32 = hide_delay_bounds::MAX;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = volume_bounds::DEFAULT;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = volume_bounds::MIN;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = volume_bounds::MAX;

/// Volume adjustment step per key press (5%).
pub const VOLUME_STEP: f32 = volume_bounds::STEP;

// ==========================================================================
// Seek Defaults
// ==========================================================================

/// Default relative seek step in seconds.
pub const DEFAULT_SEEK_STEP_SECS: f64 = seek_step_bounds::DEFAULT;

/// Minimum relative seek step in seconds.
pub const MIN_SEEK_STEP_SECS: f64 = seek_step_bounds::MIN;

/// Maximum relative seek step in seconds.
pub const MAX_SEEK_STEP_SECS: f64 = seek_step_bounds::MAX;

// ==========================================================================
// Engine Defaults
// ==========================================================================

/// Delay between a quality selection and the refresh seek that makes
/// engines re-buffer at the new quality.
pub const QUALITY_REFRESH_DELAY: Duration = Duration::from_millis(150);

/// Interval at which the engine is polled for progress while mounted.
pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Time the bundled clock engine takes to "load metadata".
pub const CLOCK_ENGINE_METADATA_DELAY: Duration = Duration::from_millis(300);

/// Duration used by the demo player when none is given on the command line.
pub const DEFAULT_DEMO_DURATION_SECS: f64 = 600.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_HIDE_DELAY_SECS > 0);
    assert!(MAX_HIDE_DELAY_SECS >= MIN_HIDE_DELAY_SECS);
    assert!(DEFAULT_HIDE_DELAY_SECS >= MIN_HIDE_DELAY_SECS);
    assert!(DEFAULT_HIDE_DELAY_SECS <= MAX_HIDE_DELAY_SECS);

    assert!(MIN_VOLUME >= 0.0);
    assert!(MAX_VOLUME > MIN_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    assert!(MIN_SEEK_STEP_SECS > 0.0);
    assert!(MAX_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS >= MIN_SEEK_STEP_SECS);
    assert!(DEFAULT_SEEK_STEP_SECS <= MAX_SEEK_STEP_SECS);

    assert!(DEFAULT_DEMO_DURATION_SECS > 0.0);
};
