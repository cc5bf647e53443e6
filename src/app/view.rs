// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Player};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::typography;
use crate::ui::player;
use crate::ui::theming::ColorScheme;
use iced::widget::{container, text};
use iced::{Background, Element, Length};

/// Everything the root view needs.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: &'a ColorScheme,
    pub player: Option<&'a Player>,
    pub startup_error: Option<&'a str>,
}

/// Renders the player, or the reason it could not start.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match (ctx.player, ctx.startup_error) {
        (Some(player), _) => player
            .view(&player::ViewContext {
                i18n: ctx.i18n,
                colors: ctx.colors,
            })
            .map(Message::Player),
        (None, Some(error)) => container(text(error.to_string()).size(typography::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        (None, None) => container(text(ctx.i18n.tr("player-loading")).size(typography::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let surface = ctx.colors.surface_primary;
    let text_color = ctx.colors.text_primary;
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(surface)),
            text_color: Some(text_color),
            ..container::Style::default()
        })
        .into()
}
