// SPDX-License-Identifier: MPL-2.0
//! Controls bar.
//!
//! Play/pause, skip buttons, the seek bar, time display, mute and volume,
//! captions, the speed and quality menu toggles, and fullscreen.

use super::menus::{quality_label, MenuState};
use super::{seek_bar, Message, ViewContext};
use crate::domain::video::SeekStep;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::video_player::PlaybackSession;
use iced::widget::{button, column, container, mouse_area, row, slider, text, tooltip, Space, Text};
use iced::{Alignment, Element, Length};

/// Volume slider step.
const VOLUME_SLIDER_STEP: f32 = 0.01;

fn control_button<'a>(
    label: String,
    tooltip_text: String,
    on_press: Message,
    active: bool,
) -> Element<'a, Message> {
    let base = button(text(label).size(typography::BODY))
        .on_press(on_press)
        .padding(spacing::XS)
        .width(Length::Shrink)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT));

    let content: Element<'a, Message> = if active {
        base.style(styles::button::selected).into()
    } else {
        base.style(styles::button::overlay).into()
    };

    tooltip(content, Text::new(tooltip_text), tooltip::Position::Top)
        .gap(4)
        .into()
}

/// Formats a seek step for the skip tooltips ("10", "2.5").
fn step_label(step: SeekStep) -> String {
    let secs = step.value();
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs:.1}")
    }
}

pub fn view<'a>(
    ctx: &ViewContext<'a>,
    session: &PlaybackSession,
    menus: MenuState,
    seek_step: SeekStep,
    time_label: String,
) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let step = step_label(seek_step);

    let play_pause = if session.is_playing() {
        control_button(
            "❚❚".to_string(),
            i18n.tr("player-pause"),
            Message::TogglePlayPause,
            false,
        )
    } else {
        control_button(
            "▶".to_string(),
            i18n.tr("player-play"),
            Message::TogglePlayPause,
            false,
        )
    };

    let skip_backward = control_button(
        "«".to_string(),
        i18n.tr_with_args("player-seek-backward", &[("seconds", step.clone().into())]),
        Message::SkipBackward,
        false,
    );
    let skip_forward = control_button(
        "»".to_string(),
        i18n.tr_with_args("player-seek-forward", &[("seconds", step.into())]),
        Message::SkipForward,
        false,
    );

    let mute = if session.is_muted() {
        control_button("♪̸".to_string(), i18n.tr("player-unmute"), Message::ToggleMute, true)
    } else {
        control_button("♪".to_string(), i18n.tr("player-mute"), Message::ToggleMute, false)
    };

    let volume = tooltip(
        slider(0.0..=1.0, session.volume().value(), Message::SetVolume)
            .step(VOLUME_SLIDER_STEP)
            .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH)),
        Text::new(format!("{} {}%", i18n.tr("player-volume"), session.volume().percent())),
        tooltip::Position::Top,
    )
    .gap(4);

    let time_display = text(time_label).size(typography::CAPTION);

    let captions_tooltip = if session.captions_enabled() {
        i18n.tr("player-captions-off")
    } else {
        i18n.tr("player-captions-on")
    };
    let captions = control_button(
        i18n.tr("player-captions-label"),
        captions_tooltip,
        Message::ToggleCaptions,
        session.captions_enabled(),
    );

    let speed = control_button(
        session.rate().label(),
        i18n.tr("player-menu-speed"),
        Message::ToggleSpeedMenu,
        menus.is_speed_open(),
    );
    let quality = control_button(
        quality_label(i18n, session.quality()),
        i18n.tr("player-menu-quality"),
        Message::ToggleQualityMenu,
        menus.is_quality_open(),
    );

    let fullscreen_tooltip = if session.is_fullscreen() {
        i18n.tr("player-fullscreen-exit")
    } else {
        i18n.tr("player-fullscreen-enter")
    };
    let fullscreen = control_button(
        "⛶".to_string(),
        fullscreen_tooltip,
        Message::ToggleFullscreen,
        session.is_fullscreen(),
    );

    let buttons = row![
        play_pause,
        skip_backward,
        skip_forward,
        mute,
        volume,
        time_display,
        Space::new().width(Length::Fill),
        captions,
        speed,
        quality,
        fullscreen,
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    let seek = seek_bar::view(
        session.played().value(),
        session.hover_preview(),
        ctx.colors,
        Message::SeekBar,
    );

    let bar = container(column![seek, buttons].spacing(spacing::XXS))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::CONTROLS_BAR_HEIGHT))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::overlay::controls_container);

    // Presses on the bar background are outside any open menu.
    mouse_area(bar).on_press(Message::OutsidePress).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_label_drops_whole_second_decimals() {
        assert_eq!(step_label(SeekStep::new(10.0)), "10");
        assert_eq!(step_label(SeekStep::new(2.5)), "2.5");
    }
}
