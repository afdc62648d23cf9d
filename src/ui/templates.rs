use iced::widget::{button, column, container, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::state::data::Template;
use crate::Message;

/// All template cards laid out as a wrapping gallery
pub fn template_gallery<'a>(templates: &'a [Template], can_use: bool) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = templates
        .iter()
        .map(|template| template_card(template, can_use))
        .collect();

    Wrap::with_elements(cards)
        .spacing(14.0)
        .line_spacing(14.0)
        .into()
}

/// One video-template card
///
/// Picking is disabled until an album code is entered, since the album is
/// what the images come from.
pub fn template_card<'a>(template: &'a Template, can_use: bool) -> Element<'a, Message> {
    container(
        column![
            text(&template.name).size(19),
            text(format!(
                "Needs {} images | {} effect",
                template.max_selected(),
                template.effect()
            ))
            .size(13)
            .color(super::MUTED),
            text(&template.createdon).size(11).color(super::MUTED),
            button(text("Use this template").size(13))
                .on_press_maybe(
                    can_use.then(|| Message::TemplatePicked(template.template_id.clone()))
                )
                .style(button::primary),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::Fixed(250.0))
    .style(container::rounded_box)
    .into()
}
