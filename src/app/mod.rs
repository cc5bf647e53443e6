// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires together configuration, localization, the player
//! component, and the platform fullscreen capability, and routes messages
//! between them.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, paths, Config, CLOCK_ENGINE_METADATA_DELAY, DEFAULT_DEMO_DURATION_SECS};
use crate::error::EngineError;
use crate::i18n::fluent::I18n;
use crate::ui::fullscreen::{self, FullscreenController};
use crate::ui::player;
use crate::ui::theming::ColorScheme;
use crate::video_player::{ClockEngineFactory, MediaSource, SessionOptions};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Player component driving the bundled clock engine.
pub type Player = player::State<ClockEngineFactory>;

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    config: Config,
    colors: ColorScheme,
    player: Option<Player>,
    fullscreen: Box<dyn FullscreenController<Message>>,
    window_id: Option<window::Id>,
    /// Translated reason the player could not mount.
    startup_error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("player_mounted", &self.player.is_some())
            .field("window_id", &self.window_id)
            .field("startup_error", &self.startup_error)
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 600.0;
pub const MIN_WINDOW_WIDTH: f32 = 560.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

/// Builds the window settings.
///
/// Close requests are handled by the app so the player can unmount first.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Session defaults taken from the user's settings.
fn session_options(config: &Config) -> SessionOptions {
    SessionOptions {
        autoplay: config.player.autoplay.unwrap_or(true),
        volume: config.player.volume(),
        muted: config.player.muted.unwrap_or(false),
        quality: config.player.quality(),
        captions: config.player.captions.unwrap_or(false),
        hide_delay: config.controls.hide_delay(),
    }
}

fn mount_player(
    config: &Config,
    title: String,
    duration_secs: f64,
) -> Result<(Player, Task<player::Message>), EngineError> {
    let source = MediaSource::new(title.clone(), duration_secs)?;
    let factory =
        ClockEngineFactory::new(source).with_metadata_delay(CLOCK_ENGINE_METADATA_DELAY);
    player::State::mount(
        factory,
        title,
        session_options(config),
        config.player.seek_step(),
    )
}

impl App {
    /// Loads settings and mounts the player described by `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        if let Some(key) = config_warning {
            log::warn!("{}", i18n.tr(&key));
        }
        Self::with_parts(config, i18n, flags.title, flags.duration_secs)
    }

    fn with_parts(
        config: Config,
        i18n: I18n,
        title: Option<String>,
        duration_secs: Option<f64>,
    ) -> (Self, Task<Message>) {
        let title = title.unwrap_or_else(|| i18n.tr("player-demo-title"));
        let duration = duration_secs.unwrap_or(DEFAULT_DEMO_DURATION_SECS);

        let mut app = App {
            colors: ColorScheme::for_mode(config.general.theme_mode),
            i18n,
            config,
            player: None,
            fullscreen: fullscreen::select_adapter(None),
            window_id: None,
            startup_error: None,
        };

        let task = match mount_player(&app.config, title, duration) {
            Ok((player, task)) => {
                log::info!("player mounted: {}", player.title());
                app.player = Some(player);
                task.map(Message::Player)
            }
            Err(err) => {
                log::error!("could not mount player: {err}");
                app.startup_error = Some(app.i18n.tr(err.i18n_key()));
                Task::none()
            }
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match &self.player {
            Some(player) => format!("{} - {app_name}", player.title()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.config.general.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let player_mounted = self.player.as_ref().is_some_and(Player::is_mounted);
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(player_mounted),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            player: &mut self.player,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
        };

        match message {
            Message::Player(player_message) => {
                update::handle_player_message(&mut ctx, player_message)
            }
            Message::WindowCloseRequested(window) => update::handle_window_close(&mut ctx, window),
            Message::WindowResized(window) => update::handle_window_resized(&mut ctx, window),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            colors: &self.colors,
            player: self.player.as_ref(),
            startup_error: self.startup_error.as_deref(),
        })
    }
}
