// SPDX-License-Identifier: MPL-2.0
//! Wall-clock playback engine.
//!
//! `ClockEngine` behaves like an embeddable player without decoding any
//! frames: it takes a moment to "load metadata", advances its position with
//! the monotonic clock scaled by the playback rate, and only honors a new
//! quality hint after re-buffering (a seek).

use super::engine::{
    EngineEvent, EngineFactory, EngineOptions, PlaybackEngine, SeekTarget, SettingApplied,
};
use crate::config::CLOCK_ENGINE_METADATA_DELAY;
use crate::domain::video::{PlaybackRate, PlayedFraction, Quality, Volume};
use crate::error::EngineError;
use std::time::{Duration, Instant};

/// Media description handed to the engine factory.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSource {
    title: String,
    duration_secs: f64,
}

impl MediaSource {
    /// Creates a source, rejecting non-finite or non-positive durations.
    pub fn new(title: impl Into<String>, duration_secs: f64) -> Result<Self, EngineError> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(EngineError::InvalidSource(format!(
                "duration must be positive, got {duration_secs}"
            )));
        }
        Ok(Self {
            title: title.into(),
            duration_secs,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

#[derive(Debug, Clone)]
pub struct ClockEngine {
    duration_secs: f64,
    metadata_delay: Duration,
    mounted_at: Option<Instant>,
    last_tick: Option<Instant>,
    ready: bool,
    /// Set by a seek; the next poll reports the duration again.
    reloaded: bool,
    position_secs: f64,
    start_at_secs: Option<f64>,
    playing: bool,
    volume: Volume,
    muted: bool,
    rate: PlaybackRate,
    quality: Quality,
    pending_quality: Option<Quality>,
    captions: bool,
}

impl ClockEngine {
    #[must_use]
    pub fn new(source: &MediaSource, options: &EngineOptions) -> Self {
        Self {
            duration_secs: source.duration_secs,
            metadata_delay: CLOCK_ENGINE_METADATA_DELAY,
            mounted_at: None,
            last_tick: None,
            ready: false,
            reloaded: false,
            position_secs: 0.0,
            start_at_secs: options.start_at_secs,
            playing: options.playing,
            volume: options.volume,
            muted: options.muted,
            rate: options.rate,
            quality: options.quality,
            pending_quality: None,
            captions: options.captions,
        }
    }

    /// Overrides how long the engine pretends to load metadata.
    #[must_use]
    pub fn with_metadata_delay(mut self, delay: Duration) -> Self {
        self.metadata_delay = delay;
        self
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    /// Quality currently in effect (a pending hint is not included).
    #[must_use]
    pub fn quality(&self) -> Quality {
        self.quality
    }

    #[must_use]
    pub fn captions(&self) -> bool {
        self.captions
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        if secs.is_finite() {
            secs.clamp(0.0, self.duration_secs)
        } else {
            0.0
        }
    }

    fn advance(&mut self, now: Instant) {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.last_tick = Some(now);
        if !self.playing {
            return;
        }
        self.position_secs = self.clamp_position(self.position_secs + elapsed * self.rate.value());
        if self.position_secs >= self.duration_secs {
            log::debug!("clock engine reached end of media");
            self.playing = false;
        }
    }
}

impl PlaybackEngine for ClockEngine {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn current_time(&self) -> Option<f64> {
        self.ready.then_some(self.position_secs)
    }

    fn seek_to(&mut self, target: SeekTarget) {
        if !self.ready {
            return;
        }
        let secs = match target {
            SeekTarget::Seconds(secs) => secs,
            SeekTarget::Fraction(fraction) => {
                PlayedFraction::new(fraction).to_secs(self.duration_secs)
            }
        };
        self.position_secs = self.clamp_position(secs);
        if let Some(quality) = self.pending_quality.take() {
            log::debug!("clock engine re-buffered at {quality}");
            self.quality = quality;
        }
        self.reloaded = true;
    }

    fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    fn apply_quality(&mut self, quality: Quality) -> SettingApplied {
        if quality == self.quality {
            self.pending_quality = None;
            return SettingApplied::Live;
        }
        self.pending_quality = Some(quality);
        SettingApplied::NeedsRefresh
    }

    fn poll(&mut self, now: Instant) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let mounted_at = *self.mounted_at.get_or_insert(now);

        if !self.ready {
            if now.saturating_duration_since(mounted_at) < self.metadata_delay {
                return events;
            }
            self.ready = true;
            self.last_tick = Some(now);
            if let Some(start) = self.start_at_secs.take() {
                self.position_secs = self.clamp_position(start);
            }
            events.push(EngineEvent::Duration(self.duration_secs));
        } else {
            self.advance(now);
            if std::mem::take(&mut self.reloaded) {
                events.push(EngineEvent::Duration(self.duration_secs));
            }
        }

        events.push(EngineEvent::Progress {
            played: PlayedFraction::new(self.position_secs / self.duration_secs),
            played_secs: self.position_secs,
        });
        events
    }
}

/// Builds [`ClockEngine`]s for one media source.
#[derive(Debug, Clone)]
pub struct ClockEngineFactory {
    source: MediaSource,
    metadata_delay: Duration,
}

impl ClockEngineFactory {
    #[must_use]
    pub fn new(source: MediaSource) -> Self {
        Self {
            source,
            metadata_delay: CLOCK_ENGINE_METADATA_DELAY,
        }
    }

    #[must_use]
    pub fn with_metadata_delay(mut self, delay: Duration) -> Self {
        self.metadata_delay = delay;
        self
    }

    #[must_use]
    pub fn source(&self) -> &MediaSource {
        &self.source
    }
}

impl EngineFactory for ClockEngineFactory {
    type Engine = ClockEngine;

    fn create(&self, options: &EngineOptions) -> Result<ClockEngine, EngineError> {
        Ok(ClockEngine::new(&self.source, options).with_metadata_delay(self.metadata_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, SECS_EPSILON};

    fn ready_engine(duration: f64, playing: bool) -> (ClockEngine, Instant) {
        let source = MediaSource::new("test", duration).expect("valid source");
        let options = EngineOptions {
            playing,
            ..EngineOptions::default()
        };
        let mut engine = ClockEngine::new(&source, &options).with_metadata_delay(Duration::ZERO);
        let start = Instant::now();
        let events = engine.poll(start);
        assert!(events.contains(&EngineEvent::Duration(duration)));
        (engine, start)
    }

    fn last_progress(events: &[EngineEvent]) -> Option<f64> {
        events.iter().rev().find_map(|event| match event {
            EngineEvent::Progress { played_secs, .. } => Some(*played_secs),
            EngineEvent::Duration(_) => None,
        })
    }

    #[test]
    fn source_rejects_invalid_duration() {
        assert!(MediaSource::new("x", 0.0).is_err());
        assert!(MediaSource::new("x", -3.0).is_err());
        assert!(MediaSource::new("x", f64::NAN).is_err());
        assert!(MediaSource::new("x", 12.0).is_ok());
    }

    #[test]
    fn not_ready_until_metadata_delay_elapses() {
        let source = MediaSource::new("test", 100.0).expect("valid source");
        let mut engine = ClockEngine::new(&source, &EngineOptions::default())
            .with_metadata_delay(Duration::from_millis(300));
        let start = Instant::now();

        assert!(engine.poll(start).is_empty());
        assert!(!engine.is_ready());
        assert!(engine.current_time().is_none());

        let events = engine.poll(start + Duration::from_millis(300));
        assert!(engine.is_ready());
        assert_eq!(events.first(), Some(&EngineEvent::Duration(100.0)));
    }

    #[test]
    fn seek_before_ready_is_ignored() {
        let source = MediaSource::new("test", 100.0).expect("valid source");
        let mut engine = ClockEngine::new(&source, &EngineOptions::default());
        engine.seek_to(SeekTarget::Seconds(50.0));
        assert!(engine.current_time().is_none());
    }

    #[test]
    fn position_advances_with_rate_while_playing() {
        let (mut engine, start) = ready_engine(100.0, true);
        engine.set_playback_rate(PlaybackRate::Double);

        let events = engine.poll(start + Duration::from_secs(3));
        let secs = last_progress(&events).expect("progress event");
        assert_abs_diff_eq!(secs, 6.0, epsilon = SECS_EPSILON);
    }

    #[test]
    fn paused_engine_does_not_advance() {
        let (mut engine, start) = ready_engine(100.0, false);
        let events = engine.poll(start + Duration::from_secs(5));
        assert_abs_diff_eq!(last_progress(&events).unwrap_or(-1.0), 0.0);
    }

    #[test]
    fn seeks_are_clamped_to_media_bounds() {
        let (mut engine, _) = ready_engine(100.0, false);

        engine.seek_to(SeekTarget::Seconds(250.0));
        assert_eq!(engine.current_time(), Some(100.0));

        engine.seek_to(SeekTarget::Seconds(-4.0));
        assert_eq!(engine.current_time(), Some(0.0));

        engine.seek_to(SeekTarget::Fraction(0.5));
        assert_eq!(engine.current_time(), Some(50.0));
    }

    #[test]
    fn playback_stops_at_end_of_media() {
        let (mut engine, start) = ready_engine(10.0, true);
        let events = engine.poll(start + Duration::from_secs(30));
        assert_abs_diff_eq!(last_progress(&events).unwrap_or(0.0), 10.0);
        assert!(!engine.is_playing());
    }

    #[test]
    fn quality_hint_waits_for_rebuffer() {
        let (mut engine, start) = ready_engine(100.0, false);

        assert_eq!(engine.apply_quality(Quality::P480), SettingApplied::NeedsRefresh);
        assert_eq!(engine.quality(), Quality::Auto);

        engine.seek_to(SeekTarget::Seconds(0.0));
        assert_eq!(engine.quality(), Quality::P480);

        let events = engine.poll(start + Duration::from_millis(10));
        assert!(events.contains(&EngineEvent::Duration(100.0)));
    }

    #[test]
    fn reapplying_current_quality_is_live() {
        let (mut engine, _) = ready_engine(100.0, false);
        assert_eq!(engine.apply_quality(Quality::Auto), SettingApplied::Live);
    }

    #[test]
    fn start_position_is_restored_once_ready() {
        let source = MediaSource::new("test", 100.0).expect("valid source");
        let options = EngineOptions {
            playing: false,
            start_at_secs: Some(42.0),
            ..EngineOptions::default()
        };
        let mut engine = ClockEngine::new(&source, &options).with_metadata_delay(Duration::ZERO);
        let events = engine.poll(Instant::now());
        assert_abs_diff_eq!(last_progress(&events).unwrap_or(0.0), 42.0);
    }

    #[test]
    fn factory_applies_construction_options() {
        let source = MediaSource::new("test", 100.0).expect("valid source");
        let factory = ClockEngineFactory::new(source);
        let options = EngineOptions {
            captions: true,
            muted: true,
            rate: PlaybackRate::Half,
            ..EngineOptions::default()
        };
        let engine = factory.create(&options).expect("engine");
        assert!(engine.captions());
        assert!(engine.is_muted());
        assert_eq!(engine.rate(), PlaybackRate::Half);
    }
}
