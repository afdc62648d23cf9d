use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, Column, Row};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use crate::state::data::Album;
use crate::state::reorder::ReorderDraft;
use crate::state::selection::SelectionState;
use crate::Message;

const TILE_WIDTH: f32 = 96.0;
const TILE_HEIGHT: f32 = 72.0;

fn tile<'a>(
    id: &'a str,
    album: &'a Album,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    match thumbnails.get(id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .into(),
        None => {
            let title = album
                .item(id)
                .map(|item| item.title.as_str())
                .unwrap_or("Image not found");
            container(text(title).size(11).color(super::MUTED))
                .center_x(Length::Fixed(TILE_WIDTH))
                .center_y(Length::Fixed(TILE_HEIGHT))
                .style(container::bordered_box)
                .into()
        }
    }
}

/// The strip of currently selected images in submission order
pub fn selected_strip<'a>(
    album: &'a Album,
    selection: &'a SelectionState,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = selection
        .selected()
        .iter()
        .enumerate()
        .map(|(pos, id)| {
            column![
                tile(id, album, thumbnails),
                row![
                    text(format!("{}", pos + 1)).size(12),
                    button(text("Remove").size(11))
                        .on_press(Message::EvictionResolved(id.clone()))
                        .style(button::danger)
                        .padding(2),
                ]
                .spacing(6)
                .align_y(Alignment::Center),
            ]
            .spacing(3)
            .align_x(Alignment::Center)
            .into()
        })
        .collect();

    let header = row![
        text(format!("{} Selected Images", selection.len())).size(15),
        horizontal_space(),
        button(text("Rearrange").size(12))
            .on_press_maybe((selection.len() > 1).then_some(Message::ReorderOpened))
            .style(button::secondary),
        button(text("Clear selection").size(12))
            .on_press(Message::SelectionCleared)
            .style(button::danger),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let strip = scrollable(Row::with_children(tiles).spacing(10).padding(4))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ));

    container(column![header, strip].spacing(8))
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// The prompt shown when a pick would exceed the template's bound
///
/// The parked candidate only enters the selection through one of the
/// replace buttons; closing the prompt keeps the selection as it was.
pub fn overflow_prompt<'a>(
    album: &'a Album,
    selection: &'a SelectionState,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let candidate = selection.pending().unwrap_or_default();
    let candidate_title = album
        .item(candidate)
        .map(|item| item.title.as_str())
        .unwrap_or(candidate);

    // Two ways out per slot: drop the slot and append the candidate, or
    // swap the candidate into the slot keeping its position
    let choices: Vec<Element<'a, Message>> = selection
        .selected()
        .iter()
        .map(|id| {
            column![
                tile(id, album, thumbnails),
                button(text("Remove & add").size(11))
                    .on_press(Message::EvictionResolved(id.clone()))
                    .style(button::primary)
                    .padding(3),
                button(text("Swap in place").size(11))
                    .on_press(Message::ImageReplaced { old_id: id.clone() })
                    .style(button::secondary)
                    .padding(3),
            ]
            .spacing(3)
            .align_x(Alignment::Center)
            .into()
        })
        .collect();

    container(
        column![
            text("Maximum images selected").size(17).color(super::WARNING),
            text(format!(
                "This template takes {} images. Pick one to swap out for {}.",
                selection.max_selected(),
                candidate_title
            ))
            .size(13),
            Row::with_children(choices).spacing(10),
            button(text("Keep current selection").size(12))
                .on_press(Message::OverflowCancelled)
                .style(button::secondary),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

/// The rearrange panel working on a scratch copy of the selection
pub fn reorder_panel<'a>(
    draft: &'a ReorderDraft,
    album: &'a Album,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let last = draft.len().saturating_sub(1);
    let rows: Vec<Element<'a, Message>> = draft
        .order()
        .iter()
        .enumerate()
        .map(|(pos, id)| {
            let title = album
                .item(id)
                .map(|item| item.title.as_str())
                .unwrap_or("Image not found");
            row![
                text(format!("{}", pos + 1)).size(13).width(24.0),
                tile(id, album, thumbnails),
                text(title).size(13).width(Length::Fill),
                button(text("Up").size(11))
                    .on_press_maybe((pos > 0).then(|| Message::ReorderMoved {
                        id: id.clone(),
                        to: pos - 1,
                    }))
                    .style(button::secondary),
                button(text("Down").size(11))
                    .on_press_maybe((pos < last).then(|| Message::ReorderMoved {
                        id: id.clone(),
                        to: pos + 1,
                    }))
                    .style(button::secondary),
                button(text("Remove").size(11))
                    .on_press(Message::ReorderRemoved(id.clone()))
                    .style(button::danger),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
        })
        .collect();

    container(
        column![
            text("Rearrange your images").size(17),
            text("The first image opens your video.").size(12).color(super::MUTED),
            Column::with_children(rows).spacing(6),
            row![
                button(text("Save order").size(13))
                    .on_press(Message::ReorderConfirmed)
                    .style(button::primary),
                button(text("Cancel").size(13))
                    .on_press(Message::ReorderCancelled)
                    .style(button::text),
            ]
            .spacing(10),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}
