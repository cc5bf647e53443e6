// SPDX-License-Identifier: MPL-2.0
//! Playback engine contract.
//!
//! The controller never decodes media itself. It drives an engine through
//! [`PlaybackEngine`] and learns about progress by polling it for
//! [`EngineEvent`]s. Engines are built by an [`EngineFactory`] from
//! [`EngineOptions`], which is also how the controller remounts an engine
//! when a setting cannot be switched live.

use crate::domain::video::{PlaybackRate, PlayedFraction, Quality, Volume};
use crate::error::EngineError;
use std::time::Instant;

/// Seek request unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Absolute position in seconds.
    Seconds(f64),
    /// Position as a fraction of the duration (0.0–1.0).
    Fraction(f64),
}

/// Callback events reported by an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Periodic progress report.
    Progress {
        played: PlayedFraction,
        played_secs: f64,
    },
    /// Media duration became known (may be reported again after a reload).
    Duration(f64),
}

/// How an engine honored a setting change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingApplied {
    /// The setting took effect immediately.
    Live,
    /// The setting is stored but only takes effect after the engine
    /// re-buffers, which a seek to the current position triggers.
    NeedsRefresh,
    /// The engine must be rebuilt with new options.
    NeedsRemount,
}

/// Construction-time engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub playing: bool,
    pub volume: Volume,
    pub muted: bool,
    pub rate: PlaybackRate,
    pub quality: Quality,
    pub captions: bool,
    /// Position to resume from once metadata is loaded.
    pub start_at_secs: Option<f64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            playing: true,
            volume: Volume::default(),
            muted: false,
            rate: PlaybackRate::default(),
            quality: Quality::default(),
            captions: false,
            start_at_secs: None,
        }
    }
}

/// An embeddable player capable of play/pause/seek/volume/rate control.
pub trait PlaybackEngine {
    /// Returns true once metadata is loaded and seeks are honored.
    fn is_ready(&self) -> bool;

    /// Starts or pauses playback.
    fn set_playing(&mut self, playing: bool);

    /// Current position in seconds, or `None` before the engine is ready.
    fn current_time(&self) -> Option<f64>;

    /// Requests a seek. Out-of-range targets are clamped by the engine.
    fn seek_to(&mut self, target: SeekTarget);

    fn set_volume(&mut self, volume: Volume);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: PlaybackRate);

    /// Forwards a quality hint.
    ///
    /// Most embeddable engines only honor a new hint after re-buffering.
    fn apply_quality(&mut self, quality: Quality) -> SettingApplied {
        let _ = quality;
        SettingApplied::NeedsRefresh
    }

    /// Requests the caption track on or off.
    ///
    /// Engines that read caption preferences only at construction time
    /// need a remount.
    fn apply_captions(&mut self, enabled: bool) -> SettingApplied {
        let _ = enabled;
        SettingApplied::NeedsRemount
    }

    /// Drains the events produced since the previous poll.
    fn poll(&mut self, now: Instant) -> Vec<EngineEvent>;
}

/// Builds engines for a given media source.
pub trait EngineFactory {
    type Engine: PlaybackEngine;

    /// Creates a new engine configured with `options`.
    fn create(&self, options: &EngineOptions) -> Result<Self::Engine, EngineError>;
}
