// SPDX-License-Identifier: MPL-2.0
//! Speed and quality menus.
//!
//! Only one menu can be open at a time; [`MenuState`] encodes that directly.
//! A menu closes on selection, on its toggle button, or when the pointer is
//! pressed anywhere outside its panel.

use super::Message;
use crate::domain::video::{PlaybackRate, Quality};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, mouse_area, text, Column};
use iced::{Element, Length};

/// Which menu, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Quality,
    Speed,
}

impl MenuState {
    /// Opens the quality menu, closing the speed menu; closes it if open.
    pub fn toggle_quality(&mut self) {
        *self = match self {
            MenuState::Quality => MenuState::Closed,
            _ => MenuState::Quality,
        };
    }

    /// Opens the speed menu, closing the quality menu; closes it if open.
    pub fn toggle_speed(&mut self) {
        *self = match self {
            MenuState::Speed => MenuState::Closed,
            _ => MenuState::Speed,
        };
    }

    pub fn close(&mut self) {
        *self = MenuState::Closed;
    }

    /// Handles a pointer press outside the open menu's panel.
    ///
    /// Returns true if a menu was closed.
    pub fn close_on_outside_press(&mut self) -> bool {
        let was_open = self.is_open();
        self.close();
        was_open
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self != MenuState::Closed
    }

    #[must_use]
    pub fn is_quality_open(self) -> bool {
        self == MenuState::Quality
    }

    #[must_use]
    pub fn is_speed_open(self) -> bool {
        self == MenuState::Speed
    }
}

/// Label for a quality entry; "auto" is translated.
pub fn quality_label(i18n: &I18n, quality: Quality) -> String {
    match quality {
        Quality::Auto => i18n.tr("player-quality-auto"),
        other => other.as_str().to_string(),
    }
}

fn entry<'a>(label: String, selected: bool, on_press: Message) -> Element<'a, Message> {
    let entry = button(text(label).size(typography::BODY))
        .on_press(on_press)
        .width(Length::Fill)
        .padding([spacing::XXS, spacing::XS]);
    if selected {
        entry.style(styles::button::selected).into()
    } else {
        entry.style(styles::button::overlay).into()
    }
}

fn panel<'a>(title: String, entries: Vec<Element<'a, Message>>) -> Element<'a, Message> {
    let list = entries.into_iter().fold(
        Column::new()
            .spacing(spacing::XXS)
            .push(text(title).size(typography::CAPTION)),
        |column, entry| column.push(entry),
    );

    // Presses on the panel itself must not count as outside presses.
    mouse_area(
        container(list)
            .width(Length::Fixed(sizing::MENU_WIDTH))
            .padding(spacing::XS)
            .style(styles::overlay::menu_panel),
    )
    .on_press(Message::ConsumeClick)
    .into()
}

/// Renders the open menu panel, if any.
pub fn view<'a>(
    i18n: &I18n,
    menus: MenuState,
    rate: PlaybackRate,
    quality: Quality,
) -> Option<Element<'a, Message>> {
    match menus {
        MenuState::Closed => None,
        MenuState::Speed => Some(panel(
            i18n.tr("player-menu-speed"),
            PlaybackRate::ALL
                .iter()
                .rev()
                .map(|&option| entry(option.label(), option == rate, Message::SelectRate(option)))
                .collect(),
        )),
        MenuState::Quality => Some(panel(
            i18n.tr("player-menu-quality"),
            Quality::ALL
                .iter()
                .map(|&option| {
                    entry(
                        quality_label(i18n, option),
                        option == quality,
                        Message::SelectQuality(option),
                    )
                })
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_quality_closes_speed() {
        let mut menus = MenuState::default();
        menus.toggle_speed();
        assert!(menus.is_speed_open());

        menus.toggle_quality();
        assert!(menus.is_quality_open());
        assert!(!menus.is_speed_open());
    }

    #[test]
    fn opening_speed_closes_quality() {
        let mut menus = MenuState::default();
        menus.toggle_quality();
        menus.toggle_speed();
        assert!(menus.is_speed_open());
        assert!(!menus.is_quality_open());
    }

    #[test]
    fn toggling_open_menu_closes_it() {
        let mut menus = MenuState::default();
        menus.toggle_quality();
        menus.toggle_quality();
        assert_eq!(menus, MenuState::Closed);
    }

    #[test]
    fn outside_press_closes_any_open_menu() {
        let mut menus = MenuState::Speed;
        assert!(menus.close_on_outside_press());
        assert!(!menus.is_open());
        assert!(!menus.close_on_outside_press());
    }

    #[test]
    fn quality_labels_use_identifiers() {
        let i18n = I18n::default();
        assert_eq!(quality_label(&i18n, Quality::P1080), "1080p");
        assert!(!quality_label(&i18n, Quality::Auto).starts_with("MISSING"));
    }
}
