// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are routed to the player as raw events. Pointer movement and
//! touches count as activity even when a widget captured them; keyboard
//! shortcuts only apply when no widget did.

use super::Message;
use crate::config::PROGRESS_POLL_INTERVAL;
use crate::ui::player;
use iced::{event, mouse, time, touch, window, Subscription};

/// Routes window, pointer, and keyboard events.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(route_event)
}

fn route_event(
    event: event::Event,
    status: event::Status,
    window_id: window::Id,
) -> Option<Message> {
    match &event {
        event::Event::Window(window::Event::CloseRequested) => {
            return Some(Message::WindowCloseRequested(window_id));
        }
        // Fullscreen toggled outside the player shows up as a resize.
        event::Event::Window(window::Event::Resized(_)) => {
            return Some(Message::WindowResized(window_id));
        }
        _ => {}
    }

    let is_pointer_activity = matches!(
        event,
        event::Event::Mouse(mouse::Event::CursorMoved { .. })
            | event::Event::Touch(
                touch::Event::FingerPressed { .. } | touch::Event::FingerMoved { .. }
            )
    );

    if is_pointer_activity || matches!(status, event::Status::Ignored) {
        Some(Message::Player(player::Message::RawEvent {
            window: window_id,
            event,
        }))
    } else {
        None
    }
}

/// Polls the engine while a player is mounted.
pub fn create_tick_subscription(player_mounted: bool) -> Subscription<Message> {
    if player_mounted {
        time::every(PROGRESS_POLL_INTERVAL).map(|now| Message::Player(player::Message::Tick(now)))
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{keyboard, Point, Size};

    #[test]
    fn resize_requests_fullscreen_query() {
        let window = window::Id::unique();
        let routed = route_event(
            event::Event::Window(window::Event::Resized(Size::new(800.0, 600.0))),
            event::Status::Ignored,
            window,
        );
        assert!(matches!(routed, Some(Message::WindowResized(id)) if id == window));
    }

    #[test]
    fn close_request_is_routed_to_app() {
        let window = window::Id::unique();
        let routed = route_event(
            event::Event::Window(window::Event::CloseRequested),
            event::Status::Ignored,
            window,
        );
        assert!(matches!(routed, Some(Message::WindowCloseRequested(id)) if id == window));
    }

    #[test]
    fn captured_pointer_move_still_counts_as_activity() {
        let routed = route_event(
            event::Event::Mouse(mouse::Event::CursorMoved {
                position: Point::ORIGIN,
            }),
            event::Status::Captured,
            window::Id::unique(),
        );
        assert!(matches!(
            routed,
            Some(Message::Player(player::Message::RawEvent { .. }))
        ));
    }

    #[test]
    fn captured_key_press_is_dropped() {
        let routed = route_event(
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Character("m".into()),
                modified_key: keyboard::Key::Character("m".into()),
                physical_key: keyboard::key::Physical::Unidentified(
                    keyboard::key::NativeCode::Unidentified,
                ),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::default(),
                text: None,
                repeat: false,
            }),
            event::Status::Captured,
            window::Id::unique(),
        );
        assert!(routed.is_none());
    }
}
