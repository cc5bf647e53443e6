// SPDX-License-Identifier: MPL-2.0
//! Playback session reducer.
//!
//! [`PlaybackSession`] is the view state of one mounted player. It changes
//! only through [`PlaybackSession::apply`], a reducer over [`SessionEvent`],
//! so every transition can be exercised without a window or an engine.
//!
//! The session stores *intent* (`is_playing`, `quality`, `captions_enabled`)
//! next to what the engine reported (`played`, `duration_secs`). Engine
//! reports never write intent fields, which keeps a briefly stale engine
//! from flipping the play button back and forth.

use super::engine::{EngineOptions, SeekTarget};
use super::visibility::{ControlsVisibility, HideTimer, TimerToken};
use crate::domain::ui::HideDelay;
use crate::domain::video::{PlaybackRate, PlayedFraction, Quality, Volume};

/// Time preview shown while the pointer hovers the seek bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPreview {
    /// Media time under the pointer.
    pub time_secs: f64,
    /// Pointer x position relative to the seek bar.
    pub x: f32,
}

/// Initial values for a freshly mounted session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub autoplay: bool,
    pub volume: Volume,
    pub muted: bool,
    pub quality: Quality,
    pub captions: bool,
    pub hide_delay: HideDelay,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            volume: Volume::default(),
            muted: false,
            quality: Quality::default(),
            captions: false,
            hide_delay: HideDelay::default(),
        }
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Play,
    Pause,
    Seek(SeekTarget),
    VolumeSet(Volume),
    MuteToggled,
    RateSet(PlaybackRate),
    QualitySet(Quality),
    CaptionsToggled,
    /// Confirmed fullscreen state reported by the platform.
    FullscreenChanged(bool),
    Progress {
        played: PlayedFraction,
        played_secs: f64,
    },
    DurationKnown(f64),
    /// Pointer move or touch over the player.
    ActivityPing,
    HoverPreview(Option<HoverPreview>),
    HideTimerFired(TimerToken),
    Unmounted,
}

impl SessionEvent {
    /// Returns true for events that count as user activity.
    #[must_use]
    pub fn is_activity(&self) -> bool {
        !matches!(
            self,
            SessionEvent::Progress { .. }
                | SessionEvent::DurationKnown(_)
                | SessionEvent::HoverPreview(_)
                | SessionEvent::HideTimerFired(_)
                | SessionEvent::Unmounted
        )
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    is_playing: bool,
    volume: Volume,
    muted: bool,
    played: PlayedFraction,
    played_secs: f64,
    duration_secs: f64,
    rate: PlaybackRate,
    quality: Quality,
    captions_enabled: bool,
    is_fullscreen: bool,
    controls: ControlsVisibility,
    hover_preview: Option<HoverPreview>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl PlaybackSession {
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self {
            is_playing: options.autoplay,
            volume: options.volume,
            muted: options.muted,
            played: PlayedFraction::default(),
            played_secs: 0.0,
            duration_secs: 0.0,
            rate: PlaybackRate::default(),
            quality: options.quality,
            captions_enabled: options.captions,
            is_fullscreen: false,
            controls: ControlsVisibility::new(options.hide_delay),
            hover_preview: None,
        }
    }

    /// Applies one event and returns the hide timer to arm, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<HideTimer> {
        match event {
            SessionEvent::Play | SessionEvent::Pause => {
                self.is_playing = event == SessionEvent::Play;
                return self.controls.playing_changed(self.is_playing);
            }
            SessionEvent::Seek(target) => self.apply_seek(target),
            SessionEvent::VolumeSet(volume) => {
                self.volume = volume;
                self.muted = volume.is_silent();
            }
            SessionEvent::MuteToggled => self.muted = !self.muted,
            SessionEvent::RateSet(rate) => self.rate = rate,
            SessionEvent::QualitySet(quality) => self.quality = quality,
            SessionEvent::CaptionsToggled => self.captions_enabled = !self.captions_enabled,
            SessionEvent::FullscreenChanged(fullscreen) => self.is_fullscreen = fullscreen,
            SessionEvent::Progress {
                played,
                played_secs,
            } => {
                self.played = played;
                self.played_secs = self.clamp_secs(played_secs);
            }
            SessionEvent::DurationKnown(secs) => {
                self.duration_secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
                self.played_secs = self.clamp_secs(self.played_secs);
            }
            SessionEvent::ActivityPing => {}
            SessionEvent::HoverPreview(preview) => self.hover_preview = preview,
            SessionEvent::HideTimerFired(token) => {
                if self.controls.timer_fired(token, self.is_playing) {
                    log::trace!("controls hidden after inactivity");
                }
            }
            SessionEvent::Unmounted => {
                self.controls.dispose();
                self.hover_preview = None;
            }
        }

        if event.is_activity() {
            self.controls.activity(self.is_playing)
        } else {
            None
        }
    }

    /// Options for building an engine that reflects this session.
    #[must_use]
    pub fn engine_options(&self, start_at_secs: Option<f64>) -> EngineOptions {
        EngineOptions {
            playing: self.is_playing,
            volume: self.volume,
            muted: self.muted,
            rate: self.rate,
            quality: self.quality,
            captions: self.captions_enabled,
            start_at_secs,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
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
    pub fn played(&self) -> PlayedFraction {
        self.played
    }

    #[must_use]
    pub fn played_secs(&self) -> f64 {
        self.played_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[must_use]
    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    #[must_use]
    pub fn quality(&self) -> Quality {
        self.quality
    }

    #[must_use]
    pub fn captions_enabled(&self) -> bool {
        self.captions_enabled
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    #[must_use]
    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    #[must_use]
    pub fn hover_preview(&self) -> Option<HoverPreview> {
        self.hover_preview
    }

    /// Reflects an accepted seek right away; the next progress report
    /// overwrites it.
    fn apply_seek(&mut self, target: SeekTarget) {
        if self.duration_secs <= 0.0 {
            return;
        }
        let secs = match target {
            SeekTarget::Seconds(secs) => secs,
            SeekTarget::Fraction(fraction) => {
                PlayedFraction::new(fraction).to_secs(self.duration_secs)
            }
        };
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.played_secs = self.clamp_secs(secs);
        self.played = PlayedFraction::new(self.played_secs / self.duration_secs);
    }

    fn clamp_secs(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        if self.duration_secs > 0.0 {
            secs.min(self.duration_secs)
        } else {
            secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn progress(played: f64, played_secs: f64) -> SessionEvent {
        SessionEvent::Progress {
            played: PlayedFraction::new(played),
            played_secs,
        }
    }

    #[test]
    fn new_session_intends_to_play() {
        let session = PlaybackSession::default();
        assert!(session.is_playing());
        assert!(session.controls_visible());
        assert_abs_diff_eq!(session.duration_secs(), 0.0);
        assert!(session.hover_preview().is_none());
    }

    #[test]
    fn autoplay_option_controls_initial_intent() {
        let session = PlaybackSession::new(SessionOptions {
            autoplay: false,
            ..SessionOptions::default()
        });
        assert!(!session.is_playing());
    }

    #[test]
    fn volume_zero_mutes_and_nonzero_unmutes() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::VolumeSet(Volume::new(0.0)));
        assert!(session.is_muted());

        session.apply(SessionEvent::VolumeSet(Volume::new(0.3)));
        assert!(!session.is_muted());
        assert_abs_diff_eq!(session.volume().value(), 0.3);
    }

    #[test]
    fn mute_toggle_keeps_volume() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::VolumeSet(Volume::new(0.6)));
        session.apply(SessionEvent::MuteToggled);
        assert!(session.is_muted());
        assert_abs_diff_eq!(session.volume().value(), 0.6);
        session.apply(SessionEvent::MuteToggled);
        assert!(!session.is_muted());
        assert_abs_diff_eq!(session.volume().value(), 0.6);
    }

    #[test]
    fn progress_is_clamped_to_known_duration() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::DurationKnown(100.0));
        session.apply(progress(1.0, 140.0));
        assert_abs_diff_eq!(session.played_secs(), 100.0);
    }

    #[test]
    fn progress_before_duration_is_kept() {
        let mut session = PlaybackSession::default();
        session.apply(progress(0.0, 12.0));
        assert_abs_diff_eq!(session.played_secs(), 12.0);

        session.apply(SessionEvent::DurationKnown(10.0));
        assert_abs_diff_eq!(session.played_secs(), 10.0);
    }

    #[test]
    fn duration_overwrites_previous_value() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::DurationKnown(600.0));
        session.apply(SessionEvent::DurationKnown(598.5));
        assert_abs_diff_eq!(session.duration_secs(), 598.5);

        session.apply(SessionEvent::DurationKnown(f64::NAN));
        assert_abs_diff_eq!(session.duration_secs(), 0.0);
    }

    #[test]
    fn engine_reports_never_touch_play_intent() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::Pause);
        session.apply(SessionEvent::DurationKnown(60.0));
        session.apply(progress(0.5, 30.0));
        assert!(!session.is_playing());
    }

    #[test]
    fn commands_arm_hide_timer_only_while_playing() {
        let mut session = PlaybackSession::default();
        assert!(session.apply(SessionEvent::MuteToggled).is_some());
        assert!(session.apply(SessionEvent::Pause).is_none());
        assert!(session.apply(SessionEvent::ActivityPing).is_none());
        assert!(session.apply(SessionEvent::Play).is_some());
    }

    #[test]
    fn engine_reports_are_not_activity() {
        let mut session = PlaybackSession::default();
        assert!(session.apply(progress(0.1, 1.0)).is_none());
        assert!(session.apply(SessionEvent::DurationKnown(10.0)).is_none());
    }

    #[test]
    fn hide_timer_hides_controls_while_playing() {
        let mut session = PlaybackSession::default();
        let timer = session.apply(SessionEvent::ActivityPing).expect("timer");
        session.apply(SessionEvent::HideTimerFired(timer.token));
        assert!(!session.controls_visible());

        session.apply(SessionEvent::ActivityPing);
        assert!(session.controls_visible());
    }

    #[test]
    fn fullscreen_follows_confirmation_events() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::FullscreenChanged(true));
        assert!(session.is_fullscreen());
        session.apply(SessionEvent::FullscreenChanged(false));
        assert!(!session.is_fullscreen());
    }

    #[test]
    fn fraction_seek_updates_position_once_duration_known() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::Seek(SeekTarget::Fraction(0.5)));
        assert_abs_diff_eq!(session.played().value(), 0.0);

        session.apply(SessionEvent::DurationKnown(200.0));
        session.apply(SessionEvent::Seek(SeekTarget::Fraction(0.5)));
        assert_abs_diff_eq!(session.played_secs(), 100.0);
        assert_abs_diff_eq!(session.played().value(), 0.5);
    }

    #[test]
    fn unmount_clears_hover_and_ignores_pending_timer() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::HoverPreview(Some(HoverPreview {
            time_secs: 4.0,
            x: 10.0,
        })));
        let timer = session.apply(SessionEvent::ActivityPing).expect("timer");
        session.apply(SessionEvent::Unmounted);
        session.apply(SessionEvent::HideTimerFired(timer.token));

        assert!(session.controls_visible());
        assert!(session.hover_preview().is_none());
    }

    #[test]
    fn engine_options_mirror_session() {
        let mut session = PlaybackSession::default();
        session.apply(SessionEvent::CaptionsToggled);
        session.apply(SessionEvent::RateSet(PlaybackRate::OneAndHalf));
        session.apply(SessionEvent::QualitySet(Quality::P360));

        let options = session.engine_options(Some(12.0));
        assert!(options.captions);
        assert_eq!(options.rate, PlaybackRate::OneAndHalf);
        assert_eq!(options.quality, Quality::P360);
        assert_eq!(options.start_at_secs, Some(12.0));
    }
}
