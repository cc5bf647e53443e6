// SPDX-License-Identifier: MPL-2.0
//! Seek bar with hover time preview.
//!
//! The bar reports pointer positions relative to its own bounds together
//! with its rendered width, and [`fraction_from_x`] turns that into a seek
//! fraction. Pressing seeks immediately; moving while pressed keeps seeking
//! (drag).

use crate::ui::design_tokens::{opacity, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use crate::video_player::{format_time, HoverPreview};
use iced::widget::{column, container, mouse_area, responsive, row, text, Space};
use iced::{Color, Element, Length, Size};

/// Resolution of the played/remaining split of the track.
const TRACK_PORTIONS: f64 = 1000.0;

/// Messages emitted by the seek bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Pointer moved over the bar.
    Hovered { x: f32, width: f32 },
    Pressed,
    Released,
    /// Pointer left the bar.
    Exited,
}

/// Converts a pointer x position into a seek fraction.
///
/// Degenerate widths (before the first layout) map to the start.
#[must_use]
pub fn fraction_from_x(x: f32, width: f32) -> f64 {
    if width.is_nan() || width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    (f64::from(x) / f64::from(width)).clamp(0.0, 1.0)
}

/// Pointer state over the seek bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    pointer: Option<(f32, f32)>,
    dragging: bool,
}

/// What the component should do after a seek bar message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    /// Update the hover preview at this fraction and x position.
    Hover { fraction: f64, x: f32 },
    /// Seek to this fraction (and refresh the preview).
    Seek { fraction: f64, x: f32 },
    /// Pointer left; clear the preview.
    ClearHover,
}

impl State {
    pub fn handle(&mut self, message: Message) -> Action {
        match message {
            Message::Hovered { x, width } => {
                self.pointer = Some((x, width));
                let fraction = fraction_from_x(x, width);
                if self.dragging {
                    Action::Seek { fraction, x }
                } else {
                    Action::Hover { fraction, x }
                }
            }
            Message::Pressed => match self.pointer {
                Some((x, width)) => {
                    self.dragging = true;
                    Action::Seek {
                        fraction: fraction_from_x(x, width),
                        x,
                    }
                }
                None => Action::None,
            },
            Message::Released => {
                self.dragging = false;
                Action::None
            }
            Message::Exited => {
                self.pointer = None;
                self.dragging = false;
                Action::ClearHover
            }
        }
    }

    /// Ends any drag but keeps the last pointer position, so the next press
    /// still knows where it landed.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn portions(played: f64) -> (u16, u16) {
    let played = (played.clamp(0.0, 1.0) * TRACK_PORTIONS).round() as u16;
    (played, TRACK_PORTIONS as u16 - played)
}

fn segment<'a, M: 'a>(portion: u16, color: Color) -> Element<'a, M> {
    container(Space::new())
        .width(Length::FillPortion(portion))
        .height(Length::Fixed(sizing::TIMELINE_TRACK))
        .style(styles::overlay::track(color))
        .into()
}

/// Renders the bar, with the preview bubble above it while hovering.
pub fn view<'a, M: Clone + 'a>(
    played: f64,
    preview: Option<HoverPreview>,
    colors: &ColorScheme,
    on_event: impl Fn(Message) -> M + Clone + 'a,
) -> Element<'a, M> {
    let played_color = colors.brand_primary;
    let track_color = Color {
        a: opacity::OVERLAY_STRONG,
        ..colors.track
    };

    responsive(move |size: Size| {
        let width = size.width;
        let (played_portion, remaining_portion) = portions(played);

        let track = row![
            segment(played_portion, played_color),
            segment(remaining_portion, track_color),
        ]
        .width(Length::Fill);

        let hit_area = container(track)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::TIMELINE_HIT_HEIGHT))
            .center_y(Length::Fixed(sizing::TIMELINE_HIT_HEIGHT));

        let on_move = on_event.clone();
        let bar = mouse_area(hit_area)
            .on_move(move |point| on_move(Message::Hovered { x: point.x, width }))
            .on_press(on_event(Message::Pressed))
            .on_release(on_event(Message::Released))
            .on_exit(on_event(Message::Exited));

        let bubble: Element<'a, M> = match preview {
            Some(preview) => {
                let offset = (preview.x - sizing::HOVER_BUBBLE_WIDTH / 2.0)
                    .clamp(0.0, (width - sizing::HOVER_BUBBLE_WIDTH).max(0.0));
                row![
                    Space::new().width(Length::Fixed(offset)),
                    container(text(format_time(preview.time_secs)).size(typography::CAPTION))
                        .width(Length::Fixed(sizing::HOVER_BUBBLE_WIDTH))
                        .padding(spacing::XXS)
                        .center_x(Length::Fixed(sizing::HOVER_BUBBLE_WIDTH))
                        .style(styles::overlay::bubble),
                ]
                .into()
            }
            None => Space::new().into(),
        };

        column![bubble, bar].width(Length::Fill).into()
    })
    .into()
}
