// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::message::fullscreen_changed;
use super::{Message, Player};
use crate::ui::fullscreen::{self, FullscreenController};
use crate::ui::player;
use iced::{window, Task};

/// Mutable view of the application state that handlers work on.
pub struct UpdateContext<'a> {
    pub player: &'a mut Option<Player>,
    pub fullscreen: &'a mut Box<dyn FullscreenController<Message>>,
    pub window_id: &'a mut Option<window::Id>,
}

/// Handles player component messages.
pub fn handle_player_message(
    ctx: &mut UpdateContext<'_>,
    message: player::Message,
) -> Task<Message> {
    if let player::Message::RawEvent { window, .. } = &message {
        remember_window(ctx, *window);
    }

    let Some(player) = ctx.player.as_mut() else {
        return Task::none();
    };

    let (effect, task) = player.handle_message(message);
    let task = task.map(Message::Player);

    match effect {
        player::Effect::None => task,
        player::Effect::RequestFullscreen(desired) => Task::batch([
            task,
            fullscreen::apply(ctx.fullscreen.as_ref(), desired, fullscreen_changed),
        ]),
    }
}

/// Tears the player down, then closes the window.
pub fn handle_window_close(ctx: &mut UpdateContext<'_>, window: window::Id) -> Task<Message> {
    if let Some(player) = ctx.player.as_mut() {
        player.unmount();
    }
    *ctx.player = None;
    window::close(window)
}

/// Asks the platform for the current mode so fullscreen changes made
/// outside the player reach the session.
pub fn handle_window_resized(ctx: &mut UpdateContext<'_>, window: window::Id) -> Task<Message> {
    remember_window(ctx, window);
    if ctx.player.is_none() {
        return Task::none();
    }
    ctx.fullscreen.query(fullscreen_changed)
}

/// Switches to the window adapter the first time a window shows up.
fn remember_window(ctx: &mut UpdateContext<'_>, window: window::Id) {
    if *ctx.window_id == Some(window) {
        return;
    }
    *ctx.window_id = Some(window);
    *ctx.fullscreen = fullscreen::select_adapter(Some(window));
}
