// SPDX-License-Identifier: MPL-2.0
//! Player component encapsulating state and update logic.

use super::menus::MenuState;
use super::{controls, menus, seek_bar};
use crate::domain::video::{PlaybackRate, Quality, SeekStep, Volume};
use crate::error::EngineError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::theming::ColorScheme;
use crate::video_player::{
    Controller, ControllerEffect, EngineFactory, PlaybackSession, RefreshToken, SessionOptions,
    TimerToken,
};
use iced::widget::{column, container, mouse_area, row, text, Space};
use iced::{event, keyboard, mouse, task, touch, window, Element, Length, Task};
use std::time::{Duration, Instant};

/// Messages emitted by the player controls and timers.
#[derive(Debug, Clone)]
pub enum Message {
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    SetVolume(f32),
    ToggleMute,
    VolumeUp,
    VolumeDown,
    ToggleSpeedMenu,
    ToggleQualityMenu,
    SelectRate(PlaybackRate),
    SelectQuality(Quality),
    ToggleCaptions,
    ToggleFullscreen,
    /// Platform-confirmed fullscreen state.
    FullscreenChanged(bool),
    /// Pointer pressed outside the open menu panel.
    OutsidePress,
    /// Pointer pressed on a menu panel; swallowed.
    ConsumeClick,
    SeekBar(seek_bar::Message),
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
    /// Periodic engine poll.
    Tick(Instant),
    HideTimerFired(TimerToken),
    QualityRefreshDue(RefreshToken),
}

/// Side effects that the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Switch the window into (`true`) or out of fullscreen.
    RequestFullscreen(bool),
}

/// Rendering context passed down from the application.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: &'a ColorScheme,
}

/// Complete player component state.
pub struct State<F: EngineFactory> {
    controller: Controller<F>,
    menus: MenuState,
    seek_bar: seek_bar::State,
    title: String,
    hide_timer: Option<task::Handle>,
    refresh_timer: Option<task::Handle>,
}

impl<F: EngineFactory> State<F> {
    /// Mounts the player and arms its initial timers.
    pub fn mount(
        factory: F,
        title: impl Into<String>,
        options: SessionOptions,
        seek_step: SeekStep,
    ) -> Result<(Self, Task<Message>), EngineError> {
        let (controller, effects) = Controller::mount(factory, options, seek_step)?;
        let mut state = Self {
            controller,
            menus: MenuState::default(),
            seek_bar: seek_bar::State::default(),
            title: title.into(),
            hide_timer: None,
            refresh_timer: None,
        };
        let (_, task) = state.apply_effects(effects);
        Ok((state, task))
    }

    /// Tears the player down and cancels pending timers.
    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.hide_timer = None;
        self.refresh_timer = None;
        self.menus.close();
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<F> {
        &self.controller
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        self.controller.session()
    }

    #[must_use]
    pub fn menus(&self) -> MenuState {
        self.menus
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.controller.is_mounted()
    }

    /// Whether a hide or quality-refresh timer task is still held.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        self.hide_timer.is_some() || self.refresh_timer.is_some()
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        if !self.controller.is_mounted() {
            return (Effect::None, Task::none());
        }

        let effects = match message {
            Message::TogglePlayPause => {
                self.menus.close();
                self.controller.toggle_play_pause()
            }
            Message::SkipBackward => {
                self.menus.close();
                self.controller.skip_backward()
            }
            Message::SkipForward => {
                self.menus.close();
                self.controller.skip_forward()
            }
            Message::SetVolume(value) => {
                self.menus.close();
                self.controller.set_volume(Volume::new(value))
            }
            Message::ToggleMute => {
                self.menus.close();
                self.controller.toggle_mute()
            }
            Message::VolumeUp => self.controller.volume_up(),
            Message::VolumeDown => self.controller.volume_down(),
            Message::ToggleSpeedMenu => {
                self.menus.toggle_speed();
                self.controller.pointer_activity()
            }
            Message::ToggleQualityMenu => {
                self.menus.toggle_quality();
                self.controller.pointer_activity()
            }
            Message::SelectRate(rate) => {
                self.menus.close();
                self.controller.set_playback_rate(rate)
            }
            Message::SelectQuality(quality) => {
                self.menus.close();
                self.controller.select_quality(quality)
            }
            Message::ToggleCaptions => {
                self.menus.close();
                self.controller.toggle_captions()
            }
            Message::ToggleFullscreen => {
                self.menus.close();
                self.controller.toggle_fullscreen()
            }
            Message::FullscreenChanged(fullscreen) => {
                self.controller.on_fullscreen_changed(fullscreen)
            }
            Message::OutsidePress => {
                if self.menus.close_on_outside_press() {
                    log::trace!("menu closed by outside press");
                }
                self.controller.pointer_activity()
            }
            Message::ConsumeClick => self.controller.pointer_activity(),
            Message::SeekBar(bar_message) => self.handle_seek_bar(bar_message),
            Message::RawEvent { event, .. } => return self.handle_raw_event(event),
            Message::Tick(now) => {
                self.controller.poll_engine(now);
                Vec::new()
            }
            Message::HideTimerFired(token) => {
                self.controller.on_hide_timer_fired(token);
                Vec::new()
            }
            Message::QualityRefreshDue(token) => {
                self.controller.on_quality_refresh_due(token);
                Vec::new()
            }
        };

        self.apply_effects(effects)
    }

    fn handle_seek_bar(&mut self, message: seek_bar::Message) -> Vec<ControllerEffect> {
        if matches!(message, seek_bar::Message::Pressed) {
            self.menus.close();
        }
        match self.seek_bar.handle(message) {
            seek_bar::Action::None => Vec::new(),
            seek_bar::Action::Hover { fraction, x } => {
                self.controller.hover_at(fraction, x);
                self.controller.pointer_activity()
            }
            seek_bar::Action::Seek { fraction, x } => {
                self.controller.hover_at(fraction, x);
                self.controller.seek_to_fraction(fraction)
            }
            seek_bar::Action::ClearHover => {
                self.controller.clear_hover();
                Vec::new()
            }
        }
    }

    fn handle_raw_event(&mut self, event: event::Event) -> (Effect, Task<Message>) {
        let effects = match event {
            event::Event::Mouse(mouse::Event::CursorMoved { .. })
            | event::Event::Touch(touch::Event::FingerPressed { .. })
            | event::Event::Touch(touch::Event::FingerMoved { .. }) => {
                self.controller.pointer_activity()
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                // Leave application shortcuts alone.
                if modifiers.command() || modifiers.alt() {
                    return (Effect::None, Task::none());
                }
                self.handle_key(key.as_ref())
            }
            _ => Vec::new(),
        };
        self.apply_effects(effects)
    }

    fn handle_key(&mut self, key: keyboard::Key<&str>) -> Vec<ControllerEffect> {
        use keyboard::key::Named;
        use keyboard::Key;

        match key {
            Key::Named(Named::Space) => self.controller.toggle_play_pause(),
            Key::Named(Named::ArrowLeft) => self.controller.skip_backward(),
            Key::Named(Named::ArrowRight) => self.controller.skip_forward(),
            Key::Named(Named::ArrowUp) => self.controller.volume_up(),
            Key::Named(Named::ArrowDown) => self.controller.volume_down(),
            Key::Named(Named::Escape) => {
                if self.menus.is_open() {
                    self.menus.close();
                    self.controller.pointer_activity()
                } else if self.session().is_fullscreen() {
                    self.controller.toggle_fullscreen()
                } else {
                    Vec::new()
                }
            }
            Key::Character(c) if c.eq_ignore_ascii_case("m") => self.controller.toggle_mute(),
            Key::Character(c) if c.eq_ignore_ascii_case("f") => {
                self.controller.toggle_fullscreen()
            }
            Key::Character(c) if c.eq_ignore_ascii_case("c") => {
                self.controller.toggle_captions()
            }
            Key::Character(">") => self.controller.speed_up(),
            Key::Character("<") => self.controller.slow_down(),
            _ => Vec::new(),
        }
    }

    /// Turns controller effects into scheduled tasks.
    ///
    /// Scheduling a timer replaces (and aborts) the previous one of the same
    /// kind; the controller ignores stale tokens anyway.
    fn apply_effects(&mut self, effects: Vec<ControllerEffect>) -> (Effect, Task<Message>) {
        let mut effect = Effect::None;
        let mut tasks = Vec::new();

        for controller_effect in effects {
            match controller_effect {
                ControllerEffect::ScheduleHide(timer) => {
                    let token = timer.token;
                    let (task, handle) = delayed(timer.after, Message::HideTimerFired(token));
                    self.hide_timer = Some(handle);
                    tasks.push(task);
                }
                ControllerEffect::ScheduleQualityRefresh { token, after } => {
                    let (task, handle) = delayed(after, Message::QualityRefreshDue(token));
                    self.refresh_timer = Some(handle);
                    tasks.push(task);
                }
                ControllerEffect::RequestFullscreen(fullscreen) => {
                    effect = Effect::RequestFullscreen(fullscreen);
                }
                ControllerEffect::EngineRemounted { key } => {
                    log::debug!("player surface reset for engine {key}");
                    self.seek_bar.end_drag();
                }
            }
        }

        if !self.session().controls_visible() {
            self.menus.close();
        }

        (effect, Task::batch(tasks))
    }

    pub fn view<'a>(&self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let session = self.session();

        let status = if self.controller.is_engine_ready() {
            self.controller.display_time()
        } else {
            ctx.i18n.tr("player-loading")
        };

        let surface_content = column![
            text(self.title.clone()).size(typography::TITLE_MD),
            text(status).size(typography::BODY),
        ]
        .spacing(spacing::XS)
        .align_x(iced::Alignment::Center);

        let surface = mouse_area(
            container(surface_content)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .on_press(Message::OutsidePress);

        let mut layout = column![surface].width(Length::Fill).height(Length::Fill);

        if session.controls_visible() {
            if let Some(panel) = menus::view(ctx.i18n, self.menus, session.rate(), session.quality())
            {
                layout = layout.push(
                    row![Space::new().width(Length::Fill), panel]
                        .padding([0.0, spacing::XS])
                        .width(Length::Fill),
                );
            }
            layout = layout.push(controls::view(
                ctx,
                session,
                self.menus,
                self.controller.seek_step(),
                self.controller.display_time(),
            ));
        } else {
            layout = layout.push(
                text(ctx.i18n.tr("player-shortcuts-hint")).size(typography::CAPTION),
            );
        }

        layout.into()
    }
}

/// Sleeps, then emits `message`. The returned handle aborts the task on drop.
fn delayed(after: Duration, message: Message) -> (Task<Message>, task::Handle) {
    let (task, handle) = Task::perform(
        async move { tokio::time::sleep(after).await },
        move |()| message.clone(),
    )
    .abortable();
    (task, handle.abort_on_drop())
}
