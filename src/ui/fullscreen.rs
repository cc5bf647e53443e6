// SPDX-License-Identifier: MPL-2.0
//! Fullscreen capability.
//!
//! The player never writes its fullscreen flag directly. It asks a
//! [`FullscreenController`] to switch modes and only updates its state from
//! the mode the platform reports back afterwards. Changes made outside the
//! player (a window manager shortcut, for instance) are picked up by
//! [`FullscreenController::query`], which the app issues on window resizes.
//! Adapters are picked by [`select_adapter`] when the main window becomes
//! known.

use iced::window;
use iced::Task;

/// Platform capability for switching the player in and out of fullscreen.
pub trait FullscreenController<Message> {
    /// Requests fullscreen. `on_change` builds the confirmation message.
    fn request(&self, on_change: fn(bool) -> Message) -> Task<Message>;

    /// Leaves fullscreen. `on_change` builds the confirmation message.
    fn exit(&self, on_change: fn(bool) -> Message) -> Task<Message>;

    /// Reports the current platform state through `on_change`.
    fn query(&self, on_change: fn(bool) -> Message) -> Task<Message>;

    /// Whether the platform can switch modes at all.
    fn is_supported(&self) -> bool;
}

/// Uses Iced window modes on a known window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFullscreen {
    window: window::Id,
}

impl WindowFullscreen {
    #[must_use]
    pub fn new(window: window::Id) -> Self {
        Self { window }
    }

    fn switch<Message: Send + 'static>(
        &self,
        fullscreen: bool,
        on_change: fn(bool) -> Message,
    ) -> Task<Message> {
        let mode = if fullscreen {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };
        // Refused requests report the unchanged mode.
        window::set_mode(self.window, mode).chain(self.report(on_change))
    }

    fn report<Message: Send + 'static>(&self, on_change: fn(bool) -> Message) -> Task<Message> {
        window::mode(self.window).map(move |mode| on_change(is_fullscreen_mode(mode)))
    }
}

/// Whether a window mode counts as fullscreen for the player.
#[must_use]
pub fn is_fullscreen_mode(mode: window::Mode) -> bool {
    mode == window::Mode::Fullscreen
}

impl<Message: Send + 'static> FullscreenController<Message> for WindowFullscreen {
    fn request(&self, on_change: fn(bool) -> Message) -> Task<Message> {
        self.switch(true, on_change)
    }

    fn exit(&self, on_change: fn(bool) -> Message) -> Task<Message> {
        self.switch(false, on_change)
    }

    fn query(&self, on_change: fn(bool) -> Message) -> Task<Message> {
        self.report(on_change)
    }

    fn is_supported(&self) -> bool {
        true
    }
}

/// Used until a window is known, or where mode switching is unavailable.
///
/// Requests are ignored and no change is ever reported, so the player keeps
/// its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unsupported;

impl<Message> FullscreenController<Message> for Unsupported {
    fn request(&self, _on_change: fn(bool) -> Message) -> Task<Message> {
        log::warn!("fullscreen is not available, ignoring request");
        Task::none()
    }

    fn exit(&self, _on_change: fn(bool) -> Message) -> Task<Message> {
        log::warn!("fullscreen is not available, ignoring exit");
        Task::none()
    }

    fn query(&self, _on_change: fn(bool) -> Message) -> Task<Message> {
        Task::none()
    }

    fn is_supported(&self) -> bool {
        false
    }
}

/// Picks the adapter for the current platform state.
#[must_use]
pub fn select_adapter<Message: Send + 'static>(
    window: Option<window::Id>,
) -> Box<dyn FullscreenController<Message>> {
    match window {
        Some(id) => Box::new(WindowFullscreen::new(id)),
        None => Box::new(Unsupported),
    }
}

/// Issues the request matching the desired state.
pub fn apply<Message>(
    controller: &dyn FullscreenController<Message>,
    fullscreen: bool,
    on_change: fn(bool) -> Message,
) -> Task<Message> {
    if fullscreen {
        controller.request(on_change)
    } else {
        controller.exit(on_change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::futures::StreamExt;
    use iced_runtime::task::into_stream;
    use iced_runtime::Action;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Changed(bool),
    }

    /// Runs `task`, answering mode queries with `platform_mode`, and returns
    /// the window actions it issued along with its output.
    fn drive(task: Task<Msg>, platform_mode: window::Mode) -> (Vec<&'static str>, Vec<Msg>) {
        let Some(mut stream) = into_stream(task) else {
            return (Vec::new(), Vec::new());
        };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        let mut actions = Vec::new();
        let mut output = Vec::new();
        while let Some(action) = runtime.block_on(stream.next()) {
            match action {
                Action::Output(message) => output.push(message),
                Action::Window(window::Action::SetMode(_, _)) => actions.push("set_mode"),
                Action::Window(window::Action::GetMode(_, channel)) => {
                    actions.push("get_mode");
                    let _ = channel.send(platform_mode);
                }
                _ => actions.push("other"),
            }
        }
        (actions, output)
    }

    #[test]
    fn no_window_selects_unsupported_adapter() {
        let adapter = select_adapter::<Msg>(None);
        assert!(!adapter.is_supported());

        let task = apply(adapter.as_ref(), true, Msg::Changed);
        let (actions, output) = drive(task, window::Mode::Windowed);
        assert!(actions.is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn known_window_selects_window_adapter() {
        let adapter = select_adapter::<Msg>(Some(window::Id::unique()));
        assert!(adapter.is_supported());
    }

    #[test]
    fn request_reports_mode_read_back_from_window() {
        let adapter = WindowFullscreen::new(window::Id::unique());

        let (actions, output) = drive(
            FullscreenController::request(&adapter, Msg::Changed),
            window::Mode::Fullscreen,
        );
        assert_eq!(actions, ["set_mode", "get_mode"]);
        assert_eq!(output, [Msg::Changed(true)]);
    }

    #[test]
    fn refused_request_reports_windowed() {
        let adapter = WindowFullscreen::new(window::Id::unique());

        let (_actions, output) = drive(
            FullscreenController::request(&adapter, Msg::Changed),
            window::Mode::Windowed,
        );
        assert_eq!(output, [Msg::Changed(false)]);
    }

    #[test]
    fn query_reports_external_exit() {
        let adapter = WindowFullscreen::new(window::Id::unique());

        let (actions, output) = drive(
            FullscreenController::query(&adapter, Msg::Changed),
            window::Mode::Windowed,
        );
        assert_eq!(actions, ["get_mode"]);
        assert_eq!(output, [Msg::Changed(false)]);
    }

    #[test]
    fn unsupported_query_reports_nothing() {
        let (actions, output) = drive(
            FullscreenController::query(&Unsupported, Msg::Changed),
            window::Mode::Fullscreen,
        );
        assert!(actions.is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn only_fullscreen_mode_counts() {
        assert!(is_fullscreen_mode(window::Mode::Fullscreen));
        assert!(!is_fullscreen_mode(window::Mode::Windowed));
        assert!(!is_fullscreen_mode(window::Mode::Hidden));
    }
}
