// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::player;
use iced::window;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Player(player::Message),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
    /// Window size changed; its fullscreen state may have changed with it.
    WindowResized(window::Id),
}

/// Builds the confirmation message handed to fullscreen adapters.
pub(super) fn fullscreen_changed(fullscreen: bool) -> Message {
    Message::Player(player::Message::FullscreenChanged(fullscreen))
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_PLAYER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Title shown on the media surface.
    pub title: Option<String>,
    /// Length of the demo media in seconds.
    pub duration_secs: Option<f64>,
}
