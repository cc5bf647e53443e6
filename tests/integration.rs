// SPDX-License-Identifier: MPL-2.0
use iced_player::config::{self, Config};
use iced_player::domain::video::{PlaybackRate, PlayedFraction, Quality, SeekStep, Volume};
use iced_player::i18n::fluent::I18n;
use iced_player::ui::player::{seek_bar, MenuState};
use iced_player::video_player::{
    ClockEngine, ClockEngineFactory, Controller, ControllerEffect, HideTimer, MediaSource,
    PlaybackEngine, SessionOptions,
};
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn controller(duration: f64, autoplay: bool) -> (Controller<ClockEngineFactory>, Vec<ControllerEffect>) {
    let source = MediaSource::new("Integration", duration).expect("valid source");
    let factory = ClockEngineFactory::new(source).with_metadata_delay(Duration::ZERO);
    let options = SessionOptions {
        autoplay,
        ..SessionOptions::default()
    };
    Controller::mount(factory, options, SeekStep::default()).expect("engine mounts")
}

fn ready_controller(duration: f64, autoplay: bool) -> Controller<ClockEngineFactory> {
    let (mut controller, _) = controller(duration, autoplay);
    controller.poll_engine(Instant::now());
    assert!(controller.is_engine_ready());
    controller
}

fn hide_timer(effects: &[ControllerEffect]) -> Option<HideTimer> {
    effects.iter().find_map(|effect| match effect {
        ControllerEffect::ScheduleHide(timer) => Some(*timer),
        _ => None,
    })
}

fn engine(controller: &Controller<ClockEngineFactory>) -> &ClockEngine {
    controller.engine().expect("engine mounted")
}

#[test]
fn set_volume_mutes_exactly_at_zero() {
    let mut controller = ready_controller(60.0, false);
    for step in 0..=20 {
        let value = step as f32 / 20.0;
        controller.set_volume(Volume::new(value));
        assert_eq!(controller.session().is_muted(), value == 0.0, "volume {value}");
        assert_eq!(engine(&controller).is_muted(), value == 0.0);
    }
}

#[test]
fn toggle_mute_keeps_volume() {
    let mut controller = ready_controller(60.0, false);
    controller.set_volume(Volume::new(0.4));
    let before = controller.session().volume();

    controller.toggle_mute();
    assert!(controller.session().is_muted());
    assert_eq!(controller.session().volume(), before);

    controller.toggle_mute();
    assert!(!controller.session().is_muted());
    assert_eq!(controller.session().volume(), before);
}

#[test]
fn fullscreen_follows_platform_report() {
    let mut controller = ready_controller(60.0, false);

    let effects = controller.toggle_fullscreen();
    assert!(effects.contains(&ControllerEffect::RequestFullscreen(true)));
    assert!(!controller.session().is_fullscreen());

    // The platform refused; the reported state wins.
    controller.on_fullscreen_changed(false);
    assert!(!controller.session().is_fullscreen());

    controller.on_fullscreen_changed(true);
    assert!(controller.session().is_fullscreen());
}

#[test]
fn controls_hide_after_inactivity_while_playing() {
    let (mut controller, effects) = controller(60.0, true);
    let timer = hide_timer(&effects).expect("autoplay arms the hide timer");
    assert_eq!(timer.after, Duration::from_secs(3));

    controller.on_hide_timer_fired(timer.token);
    assert!(!controller.session().controls_visible());

    let timer = hide_timer(&controller.pointer_activity()).expect("activity re-arms");
    assert!(controller.session().controls_visible());
    assert!(timer.after >= Duration::from_secs(3));
}

#[test]
fn activity_before_timeout_keeps_controls_visible() {
    let (mut controller, effects) = controller(60.0, true);
    let stale = hide_timer(&effects).expect("armed");

    let fresh = hide_timer(&controller.pointer_activity()).expect("re-armed");
    assert_ne!(stale.token, fresh.token);

    controller.on_hide_timer_fired(stale.token);
    assert!(controller.session().controls_visible());

    controller.on_hide_timer_fired(fresh.token);
    assert!(!controller.session().controls_visible());
}

#[test]
fn paused_player_never_hides_controls() {
    let (mut controller, effects) = controller(60.0, false);
    assert!(hide_timer(&effects).is_none());
    assert!(hide_timer(&controller.pointer_activity()).is_none());

    let (mut playing, effects) = self::controller(60.0, true);
    let timer = hide_timer(&effects).expect("armed");
    playing.toggle_play_pause();
    playing.on_hide_timer_fired(timer.token);
    assert!(playing.session().controls_visible());
    assert!(controller.session().controls_visible());
}

#[test]
fn click_at_half_width_seeks_half_way() {
    let mut controller = ready_controller(200.0, false);
    let width = 640.0;
    let fraction = seek_bar::fraction_from_x(width / 2.0, width);
    assert!((fraction - 0.5).abs() < f64::EPSILON);

    controller.seek_to_fraction(fraction);
    let current = engine(&controller).current_time().expect("ready engine");
    assert!((current - 100.0).abs() < 1e-6);
}

#[test]
fn quality_and_speed_menus_are_exclusive() {
    let mut menus = MenuState::default();
    menus.toggle_speed();
    menus.toggle_quality();
    assert!(menus.is_quality_open() && !menus.is_speed_open());
    menus.toggle_speed();
    assert!(menus.is_speed_open() && !menus.is_quality_open());
}

#[test]
fn unmount_disarms_pending_hide_timer() {
    let (mut controller, effects) = controller(60.0, true);
    let timer = hide_timer(&effects).expect("armed");

    controller.unmount();
    controller.on_hide_timer_fired(timer.token);

    assert!(controller.session().controls_visible());
    assert!(!controller.is_mounted());
    assert!(controller.toggle_play_pause().is_empty());
}

#[test]
fn display_time_reflects_engine_reports() {
    let (mut controller, _) = controller(600.0, false);
    controller.on_duration(600.0);
    controller.on_progress(PlayedFraction::new(0.25), 150.0);
    assert_eq!(controller.display_time(), "02:30 / 10:00");
}

#[test]
fn every_rate_is_shown_verbatim() {
    let mut controller = ready_controller(60.0, false);
    let expected = [
        "0.25x", "0.5x", "0.75x", "1x", "1.25x", "1.5x", "1.75x", "2x",
    ];
    for (rate, label) in PlaybackRate::ALL.iter().zip(expected) {
        controller.set_playback_rate(*rate);
        assert_eq!(controller.rate_label(), label);
        assert_eq!(engine(&controller).rate(), *rate);
    }
}

#[test]
fn commands_before_ready_are_dropped() {
    let (mut controller, _) = controller(60.0, false);
    assert!(!controller.is_engine_ready());

    controller.set_playback_rate(PlaybackRate::Double);
    controller.seek_to_fraction(0.5);
    assert_eq!(controller.session().rate(), PlaybackRate::Normal);

    controller.poll_engine(Instant::now());
    assert_eq!(engine(&controller).current_time(), Some(0.0));
}

#[test]
fn captions_remount_restarts_engine_at_current_position() {
    let mut controller = ready_controller(120.0, false);
    controller.seek_to_fraction(0.5);
    let key = controller.engine_key();

    let effects = controller.toggle_captions();
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, ControllerEffect::EngineRemounted { .. })));
    assert_ne!(controller.engine_key(), key);
    assert!(engine(&controller).captions());

    controller.poll_engine(Instant::now());
    let current = engine(&controller).current_time().expect("ready again");
    assert!((current - 60.0).abs() < 1e-6);
}

#[test]
fn quality_selection_schedules_refresh() {
    let mut controller = ready_controller(120.0, false);
    let effects = controller.select_quality(Quality::P720);
    let token = effects
        .iter()
        .find_map(|effect| match effect {
            ControllerEffect::ScheduleQualityRefresh { token, .. } => Some(*token),
            _ => None,
        })
        .expect("refresh scheduled");

    controller.on_quality_refresh_due(token);
    assert_eq!(engine(&controller).quality(), Quality::P720);
}

#[test]
fn config_language_drives_locale() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
    assert_eq!(i18n.tr("player-play"), "Lecture");

    // CLI wins over the file.
    let i18n = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n.tr("player-play"), "Play");
}
