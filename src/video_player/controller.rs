// SPDX-License-Identifier: MPL-2.0
//! Playback controller.
//!
//! `Controller` owns one [`PlaybackSession`] and the engine it drives. User
//! commands update the session through the reducer and are forwarded to the
//! engine; engine reports flow back through [`Controller::poll_engine`].
//! Anything that must happen later (hiding the controls, refreshing the
//! engine after a quality change, switching the window mode) is returned as
//! a [`ControllerEffect`] for the UI layer to schedule.
//!
//! While the engine has not loaded its metadata, seek and rate commands are
//! dropped. They still count as activity.

use super::engine::{EngineEvent, EngineFactory, PlaybackEngine, SeekTarget, SettingApplied};
use super::session::{HoverPreview, PlaybackSession, SessionEvent, SessionOptions};
use super::time_format::format_position;
use super::visibility::{HideTimer, TimerToken};
use crate::config::QUALITY_REFRESH_DELAY;
use crate::domain::video::{PlaybackRate, PlayedFraction, Quality, SeekStep, Volume};
use crate::error::EngineError;
use std::time::{Duration, Instant};

/// Identifies one scheduled quality refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshToken(u64);

/// Side effects the UI layer must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEffect {
    /// Call [`Controller::on_hide_timer_fired`] after the delay.
    ScheduleHide(HideTimer),
    /// Call [`Controller::on_quality_refresh_due`] after the delay.
    ScheduleQualityRefresh { token: RefreshToken, after: Duration },
    /// Ask the platform to enter (`true`) or leave fullscreen.
    RequestFullscreen(bool),
    /// The engine was rebuilt; views keyed on the engine must reset.
    EngineRemounted { key: u64 },
}

pub struct Controller<F: EngineFactory> {
    session: PlaybackSession,
    factory: F,
    engine: Option<F::Engine>,
    engine_key: u64,
    refresh_generation: u64,
    seek_step: SeekStep,
}

impl<F: EngineFactory> Controller<F> {
    /// Mounts a player: builds the session and its first engine.
    ///
    /// The returned effects arm the initial hide timer when autoplaying.
    pub fn mount(
        factory: F,
        options: SessionOptions,
        seek_step: SeekStep,
    ) -> Result<(Self, Vec<ControllerEffect>), EngineError> {
        let mut session = PlaybackSession::new(options);
        let engine = factory.create(&session.engine_options(None))?;
        let mut effects = Vec::new();
        if let Some(timer) = session.apply(SessionEvent::ActivityPing) {
            effects.push(ControllerEffect::ScheduleHide(timer));
        }
        let controller = Self {
            session,
            factory,
            engine: Some(engine),
            engine_key: 0,
            refresh_generation: 0,
            seek_step,
        };
        Ok((controller, effects))
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[must_use]
    pub fn engine(&self) -> Option<&F::Engine> {
        self.engine.as_ref()
    }

    /// Identity of the current engine; changes on every remount.
    #[must_use]
    pub fn engine_key(&self) -> u64 {
        self.engine_key
    }

    #[must_use]
    pub fn seek_step(&self) -> SeekStep {
        self.seek_step
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    #[must_use]
    pub fn is_engine_ready(&self) -> bool {
        self.engine.as_ref().is_some_and(|engine| engine.is_ready())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Flips the intended play state and forwards it to the engine.
    pub fn toggle_play_pause(&mut self) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let event = if self.session.is_playing() {
            SessionEvent::Pause
        } else {
            SessionEvent::Play
        };
        let effects = self.dispatch(event);
        let playing = self.session.is_playing();
        if let Some(engine) = self.engine.as_mut() {
            engine.set_playing(playing);
        }
        effects
    }

    /// Seeks `delta_secs` away from the engine's current time.
    ///
    /// Out-of-range targets are left for the engine to clamp.
    pub fn seek_relative(&mut self, delta_secs: f64) -> Vec<ControllerEffect> {
        let current = self
            .ready_engine()
            .and_then(|engine| engine.current_time());
        match current {
            Some(current) => self.seek(SeekTarget::Seconds(current + delta_secs)),
            None => self.dropped("seek"),
        }
    }

    /// Seeks forward by the configured step.
    pub fn skip_forward(&mut self) -> Vec<ControllerEffect> {
        self.seek_relative(self.seek_step.value())
    }

    /// Seeks backward by the configured step.
    pub fn skip_backward(&mut self) -> Vec<ControllerEffect> {
        self.seek_relative(-self.seek_step.value())
    }

    /// Seeks to a fraction of the media (clamped to 0.0–1.0).
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Vec<ControllerEffect> {
        if self.ready_engine().is_none() {
            return self.dropped("seek");
        }
        let fraction = PlayedFraction::new(fraction).value();
        self.seek(SeekTarget::Fraction(fraction))
    }

    /// Sets the volume; a volume of exactly zero also mutes.
    pub fn set_volume(&mut self, volume: Volume) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let effects = self.dispatch(SessionEvent::VolumeSet(volume));
        let muted = self.session.is_muted();
        if let Some(engine) = self.engine.as_mut() {
            engine.set_volume(volume);
            engine.set_muted(muted);
        }
        effects
    }

    pub fn volume_up(&mut self) -> Vec<ControllerEffect> {
        self.set_volume(self.session.volume().increase())
    }

    pub fn volume_down(&mut self) -> Vec<ControllerEffect> {
        self.set_volume(self.session.volume().decrease())
    }

    /// Flips mute without touching the volume.
    pub fn toggle_mute(&mut self) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let effects = self.dispatch(SessionEvent::MuteToggled);
        let muted = self.session.is_muted();
        if let Some(engine) = self.engine.as_mut() {
            engine.set_muted(muted);
        }
        effects
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) -> Vec<ControllerEffect> {
        let Some(engine) = self.ready_engine() else {
            return self.dropped("rate change");
        };
        engine.set_playback_rate(rate);
        self.dispatch(SessionEvent::RateSet(rate))
    }

    /// Steps to the next faster preset; stays at 2x.
    pub fn speed_up(&mut self) -> Vec<ControllerEffect> {
        self.set_playback_rate(self.session.rate().faster())
    }

    /// Steps to the next slower preset; stays at 0.25x.
    pub fn slow_down(&mut self) -> Vec<ControllerEffect> {
        self.set_playback_rate(self.session.rate().slower())
    }

    /// Stores a quality hint and asks the engine to honor it.
    pub fn select_quality(&mut self, quality: Quality) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let mut effects = self.dispatch(SessionEvent::QualitySet(quality));
        let applied = self
            .engine
            .as_mut()
            .map_or(SettingApplied::Live, |engine| engine.apply_quality(quality));
        effects.extend(self.follow_up(applied));
        effects
    }

    /// Flips captions, remounting the engine if it cannot switch live.
    pub fn toggle_captions(&mut self) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let mut effects = self.dispatch(SessionEvent::CaptionsToggled);
        let enabled = self.session.captions_enabled();
        let applied = self
            .engine
            .as_mut()
            .map_or(SettingApplied::Live, |engine| engine.apply_captions(enabled));
        effects.extend(self.follow_up(applied));
        effects
    }

    /// Rebuilds the engine from the current session, resuming at the
    /// current position.
    ///
    /// Only used for settings the engine reads at construction time. If the
    /// factory fails, the previous engine is kept.
    pub fn remount_engine(&mut self) -> Vec<ControllerEffect> {
        let Some(current) = self.engine.as_ref() else {
            return Vec::new();
        };
        let start_at = current
            .current_time()
            .or_else(|| (self.session.played_secs() > 0.0).then(|| self.session.played_secs()));
        match self.factory.create(&self.session.engine_options(start_at)) {
            Ok(engine) => {
                self.engine = Some(engine);
                self.engine_key = self.engine_key.wrapping_add(1);
                // The new engine received the quality hint at construction.
                self.refresh_generation = self.refresh_generation.wrapping_add(1);
                log::debug!("engine remounted (key {})", self.engine_key);
                vec![ControllerEffect::EngineRemounted {
                    key: self.engine_key,
                }]
            }
            Err(err) => {
                log::warn!("engine remount failed, keeping current engine: {err}");
                Vec::new()
            }
        }
    }

    /// Requests the opposite fullscreen state. The session only changes once
    /// the platform confirms through [`Controller::on_fullscreen_changed`].
    pub fn toggle_fullscreen(&mut self) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let mut effects = self.dispatch(SessionEvent::ActivityPing);
        effects.push(ControllerEffect::RequestFullscreen(
            !self.session.is_fullscreen(),
        ));
        effects
    }

    /// Pointer move or touch over the player.
    pub fn pointer_activity(&mut self) -> Vec<ControllerEffect> {
        self.dispatch(SessionEvent::ActivityPing)
    }

    /// Shows the time preview for a pointer at `fraction` of the seek bar.
    pub fn hover_at(&mut self, fraction: f64, x: f32) {
        let duration = self.session.duration_secs();
        let preview = (duration > 0.0).then(|| HoverPreview {
            time_secs: PlayedFraction::new(fraction).to_secs(duration),
            x,
        });
        self.session.apply(SessionEvent::HoverPreview(preview));
    }

    pub fn clear_hover(&mut self) {
        self.session.apply(SessionEvent::HoverPreview(None));
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Platform-reported fullscreen state.
    ///
    /// Reports arrive after every request and every window resize. Only an
    /// actual change counts as activity.
    pub fn on_fullscreen_changed(&mut self, fullscreen: bool) -> Vec<ControllerEffect> {
        if fullscreen == self.session.is_fullscreen() {
            return Vec::new();
        }
        self.dispatch(SessionEvent::FullscreenChanged(fullscreen))
    }

    pub fn on_progress(&mut self, played: PlayedFraction, played_secs: f64) {
        self.session.apply(SessionEvent::Progress {
            played,
            played_secs,
        });
    }

    pub fn on_duration(&mut self, duration_secs: f64) {
        self.session.apply(SessionEvent::DurationKnown(duration_secs));
    }

    /// Drains engine reports into the session.
    pub fn poll_engine(&mut self, now: Instant) {
        let events = match self.engine.as_mut() {
            Some(engine) => engine.poll(now),
            None => return,
        };
        for event in events {
            match event {
                EngineEvent::Progress {
                    played,
                    played_secs,
                } => self.on_progress(played, played_secs),
                EngineEvent::Duration(secs) => self.on_duration(secs),
            }
        }
    }

    pub fn on_hide_timer_fired(&mut self, token: TimerToken) {
        self.session.apply(SessionEvent::HideTimerFired(token));
    }

    /// Re-seeks to the current time so the engine re-buffers with the new
    /// quality hint. Stale tokens are ignored.
    pub fn on_quality_refresh_due(&mut self, token: RefreshToken) {
        if token != RefreshToken(self.refresh_generation) {
            log::trace!("ignoring stale quality refresh");
            return;
        }
        if let Some(engine) = self.ready_engine() {
            if let Some(current) = engine.current_time() {
                engine.seek_to(SeekTarget::Seconds(current));
            }
        }
    }

    /// Tears the player down. Pending timers become no-ops.
    pub fn unmount(&mut self) {
        self.session.apply(SessionEvent::Unmounted);
        self.refresh_generation = self.refresh_generation.wrapping_add(1);
        self.engine = None;
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Time label such as `"02:30 / 10:00"`.
    #[must_use]
    pub fn display_time(&self) -> String {
        format_position(self.session.played_secs(), self.session.duration_secs())
    }

    /// Speed label such as `"1.5x"`.
    #[must_use]
    pub fn rate_label(&self) -> String {
        self.session.rate().label()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ready_engine(&mut self) -> Option<&mut F::Engine> {
        self.engine.as_mut().filter(|engine| engine.is_ready())
    }

    fn seek(&mut self, target: SeekTarget) -> Vec<ControllerEffect> {
        if let Some(engine) = self.engine.as_mut() {
            engine.seek_to(target);
        }
        self.dispatch(SessionEvent::Seek(target))
    }

    fn dropped(&mut self, command: &str) -> Vec<ControllerEffect> {
        if !self.is_mounted() {
            return Vec::new();
        }
        log::debug!("engine not ready, dropping {command}");
        self.dispatch(SessionEvent::ActivityPing)
    }

    fn follow_up(&mut self, applied: SettingApplied) -> Vec<ControllerEffect> {
        match applied {
            SettingApplied::Live => Vec::new(),
            SettingApplied::NeedsRefresh => {
                self.refresh_generation = self.refresh_generation.wrapping_add(1);
                vec![ControllerEffect::ScheduleQualityRefresh {
                    token: RefreshToken(self.refresh_generation),
                    after: QUALITY_REFRESH_DELAY,
                }]
            }
            SettingApplied::NeedsRemount => self.remount_engine(),
        }
    }

    fn dispatch(&mut self, event: SessionEvent) -> Vec<ControllerEffect> {
        self.session
            .apply(event)
            .map(ControllerEffect::ScheduleHide)
            .into_iter()
            .collect()
    }
}
