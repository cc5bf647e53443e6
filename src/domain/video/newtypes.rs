// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges or drawn from the
//! fixed sets the controls expose.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 0.8;
    /// Volume adjustment step per key press (5%).
    pub const STEP: f32 = 0.05;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    ///
    /// `NaN` maps to silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if the volume is exactly zero.
    ///
    /// Setting this volume through the volume control mutes the player.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 == volume_bounds::MIN
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + volume_bounds::STEP)
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        // Snap tiny remainders to zero so stepping down can reach silence.
        let next = self.0 - volume_bounds::STEP;
        if next < volume_bounds::STEP / 2.0 {
            Self(volume_bounds::MIN)
        } else {
            Self::new(next)
        }
    }

    /// Returns the volume as a whole percentage for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate, restricted to the presets offered in the speed menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackRate {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackRate {
    /// All rates in ascending order, as listed in the speed menu.
    pub const ALL: [PlaybackRate; 8] = [
        PlaybackRate::Quarter,
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::OneAndThreeQuarters,
        PlaybackRate::Double,
    ];

    /// Returns the rate multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
            Self::Normal => 1.0,
            Self::OneAndQuarter => 1.25,
            Self::OneAndHalf => 1.5,
            Self::OneAndThreeQuarters => 1.75,
            Self::Double => 2.0,
        }
    }

    /// Returns the label shown in the controls (`"0.25x"`, `"1x"`, `"2x"`).
    #[must_use]
    pub fn label(self) -> String {
        format!("{}x", self.value())
    }

    /// Returns the next faster preset, or self if already the fastest.
    #[must_use]
    pub fn faster(self) -> Self {
        let index = self.index();
        Self::ALL.get(index + 1).copied().unwrap_or(self)
    }

    /// Returns the next slower preset, or self if already the slowest.
    #[must_use]
    pub fn slower(self) -> Self {
        let index = self.index();
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(self)
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|rate| *rate == self)
            .unwrap_or(3)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

// =============================================================================
// Quality
// =============================================================================

/// Resolution hint forwarded to the playback engine.
///
/// This is a preference, not a guarantee: engines may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    #[default]
    Auto,
    P1080,
    P720,
    P480,
    P360,
    P240,
    P144,
}

impl Quality {
    /// All qualities in menu order (auto first, then descending resolution).
    pub const ALL: [Quality; 7] = [
        Quality::Auto,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
        Quality::P240,
        Quality::P144,
    ];

    /// Returns the short identifier used in labels and config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
            Self::P240 => "240p",
            Self::P144 => "144p",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown quality identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQuality(pub String);

impl fmt::Display for UnknownQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quality: {}", self.0)
    }
}

impl FromStr for Quality {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.as_str() == normalized)
            .ok_or(UnknownQuality(s.to_string()))
    }
}

// =============================================================================
// PlayedFraction
// =============================================================================

/// Fraction of the media already played, guaranteed to be within 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayedFraction(f64);

impl PlayedFraction {
    /// Creates a new fraction, clamping to valid range. `NaN` maps to 0.
    #[must_use]
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(0.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    /// Returns the fraction value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts the fraction to seconds for a given duration.
    #[must_use]
    pub fn to_secs(self, duration_secs: f64) -> f64 {
        self.0 * duration_secs.max(0.0)
    }
}

// =============================================================================
// SeekStep
// =============================================================================

/// Seek step bounds (1 to 60 seconds).
pub mod seek_step_bounds {
    /// Minimum seek step in seconds.
    pub const MIN: f64 = 1.0;
    /// Maximum seek step in seconds.
    pub const MAX: f64 = 60.0;
    /// Default seek step in seconds.
    pub const DEFAULT: f64 = 10.0;
}

/// Relative seek step used by the skip buttons and arrow keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a new seek step value, clamping to valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the step as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Volume tests
    // -------------------------------------------------------------------------

    #[test]
    fn volume_clamps_to_valid_range() {
        assert!((Volume::new(-0.5).value() - volume_bounds::MIN).abs() < f32::EPSILON);
        assert!((Volume::new(2.0).value() - volume_bounds::MAX).abs() < f32::EPSILON);
        assert!((Volume::new(0.5).value() - 0.5).abs() < f32::EPSILON);
        assert!(Volume::new(f32::NAN).is_silent());
    }

    #[test]
    fn volume_is_silent_only_at_exact_zero() {
        assert!(Volume::new(0.0).is_silent());
        assert!(!Volume::new(0.0005).is_silent());
        assert!(!Volume::new(0.5).is_silent());
    }

    #[test]
    fn volume_decrease_reaches_silence() {
        let mut vol = Volume::new(0.12);
        for _ in 0..5 {
            vol = vol.decrease();
        }
        assert!(vol.is_silent());
        assert_eq!(Volume::new(1.0).increase(), Volume::new(1.0));
    }

    #[test]
    fn volume_percent_rounds() {
        assert_eq!(Volume::new(0.8).percent(), 80);
        assert_eq!(Volume::new(0.005).percent(), 1);
    }

    // -------------------------------------------------------------------------
    // PlaybackRate tests
    // -------------------------------------------------------------------------

    #[test]
    fn rate_labels_match_menu() {
        let labels: Vec<String> = PlaybackRate::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            ["0.25x", "0.5x", "0.75x", "1x", "1.25x", "1.5x", "1.75x", "2x"]
        );
    }

    #[test]
    fn rate_faster_and_slower_stop_at_bounds() {
        assert_eq!(PlaybackRate::Double.faster(), PlaybackRate::Double);
        assert_eq!(PlaybackRate::Quarter.slower(), PlaybackRate::Quarter);
        assert_eq!(PlaybackRate::Normal.faster(), PlaybackRate::OneAndQuarter);
        assert_eq!(PlaybackRate::Normal.slower(), PlaybackRate::ThreeQuarters);
    }

    // -------------------------------------------------------------------------
    // Quality tests
    // -------------------------------------------------------------------------

    #[test]
    fn quality_parses_config_identifiers() {
        assert_eq!("720p".parse::<Quality>(), Ok(Quality::P720));
        assert_eq!(" AUTO ".parse::<Quality>(), Ok(Quality::Auto));
        assert!("4k".parse::<Quality>().is_err());
    }

    // -------------------------------------------------------------------------
    // PlayedFraction / SeekStep tests
    // -------------------------------------------------------------------------

    #[test]
    fn played_fraction_clamps() {
        assert_eq!(PlayedFraction::new(1.5).value(), 1.0);
        assert_eq!(PlayedFraction::new(-0.1).value(), 0.0);
        assert_eq!(PlayedFraction::new(f64::NAN).value(), 0.0);
        assert!((PlayedFraction::new(0.25).to_secs(600.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn seek_step_clamps_to_valid_range() {
        assert!((SeekStep::new(0.0).value() - seek_step_bounds::MIN).abs() < 0.001);
        assert!((SeekStep::new(100.0).value() - seek_step_bounds::MAX).abs() < 0.001);
        assert_eq!(SeekStep::new(2.5).as_duration(), Duration::from_secs_f64(2.5));
    }
}
