use iced::widget::{button, row, text};
use iced::{Alignment, Element};

use crate::state::pagination::{page_count, PageWindow};
use crate::Message;

/// Previous/next page controls with a position label
///
/// `on_page` picks which screen's page the buttons drive.
pub fn pager<'a>(
    window: PageWindow,
    total_items: usize,
    on_page: fn(usize) -> Message,
) -> Element<'a, Message> {
    let pages = page_count(total_items, window.page_size).max(1);

    row![
        button(text("Previous").size(12))
            .on_press_maybe((window.current_page > 1).then(|| on_page(window.current_page - 1)))
            .style(button::secondary),
        text(format!("Page {} of {}", window.current_page, pages)).size(13),
        button(text("Next").size(12))
            .on_press_maybe((window.current_page < pages).then(|| on_page(window.current_page + 1)))
            .style(button::secondary),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
