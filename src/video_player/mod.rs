// SPDX-License-Identifier: MPL-2.0
//! Playback control for IcedPlayer.
//!
//! This module holds everything that does not need a window: the engine
//! contract, the bundled wall-clock engine, the session reducer, the
//! controls-visibility automaton, and the controller that ties them together.

pub mod clock_engine;
pub mod controller;
pub mod engine;
pub mod session;
pub mod time_format;
pub mod visibility;

pub use clock_engine::{ClockEngine, ClockEngineFactory, MediaSource};
pub use controller::{Controller, ControllerEffect, RefreshToken};
pub use engine::{
    EngineEvent, EngineFactory, EngineOptions, PlaybackEngine, SeekTarget, SettingApplied,
};
pub use session::{HoverPreview, PlaybackSession, SessionEvent, SessionOptions};
pub use time_format::{format_position, format_time};
pub use visibility::{ControlsVisibility, HideTimer, TimerToken, Visibility};
