use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::state::data::Item;
use crate::state::selection::SelectionState;
use crate::Message;

const CELL_WIDTH: f32 = 150.0;
const CELL_HEIGHT: f32 = 110.0;

/// The paged image grid with selection marks and index badges
pub fn image_grid<'a>(
    items: &'a [Item],
    thumbnails: &'a HashMap<String, image::Handle>,
    selection: &'a SelectionState,
) -> Element<'a, Message> {
    let cells: Vec<Element<'a, Message>> = items
        .iter()
        .map(|item| grid_cell(item, thumbnails, selection))
        .collect();

    Wrap::with_elements(cells)
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

fn grid_cell<'a>(
    item: &'a Item,
    thumbnails: &'a HashMap<String, image::Handle>,
    selection: &'a SelectionState,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnails.get(&item.id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(CELL_WIDTH))
            .height(Length::Fixed(CELL_HEIGHT))
            .into(),
        None => container(text("Loading...").size(12).color(super::MUTED))
            .center_x(Length::Fixed(CELL_WIDTH))
            .center_y(Length::Fixed(CELL_HEIGHT))
            .style(container::bordered_box)
            .into(),
    };

    // Selected cells show their 1-based position in the pick order
    let position = selection
        .selected()
        .iter()
        .position(|id| id.as_str() == item.id);
    let marker: Element<'a, Message> = match position {
        Some(pos) => text(format!("Selected #{}", pos + 1))
            .size(13)
            .color(super::ACCENT)
            .into(),
        None => text(format!("#{}", item.index))
            .size(12)
            .color(super::MUTED)
            .into(),
    };

    button(
        column![picture, marker]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .on_press(Message::ImageToggled(item.id.clone()))
    .style(button::text)
    .padding(4)
    .into()
}
