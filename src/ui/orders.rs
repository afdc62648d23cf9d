use chrono::NaiveDateTime;
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Color, Element, Length};
use iced_aw::Wrap;

use crate::state::data::{Order, OrderStatus};
use crate::Message;

/// Past orders laid out as a wrapping gallery
pub fn order_gallery<'a>(orders: &'a [Order]) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = orders.iter().map(order_card).collect();

    Wrap::with_elements(cards)
        .spacing(14.0)
        .line_spacing(14.0)
        .into()
}

/// One past-order card
pub fn order_card<'a>(order: &'a Order) -> Element<'a, Message> {
    container(
        column![
            row![
                text(order.title()).size(17),
                horizontal_space(),
                status_badge(order.status),
            ]
            .align_y(Alignment::Center),
            text(format!(
                "Template {} | {} images",
                order.template_id,
                order.selected_images.len()
            ))
            .size(13)
            .color(super::MUTED),
            text(format_date(&order.createdon)).size(12).color(super::MUTED),
            button(text("View details").size(13))
                .on_press(Message::OrderViewed(order.order_id))
                .style(button::secondary),
        ]
        .spacing(8),
    )
    .padding(14)
    .width(Length::Fixed(260.0))
    .style(container::rounded_box)
    .into()
}

/// The expanded details panel for one order
pub fn order_details<'a>(order: &'a Order, retrying: bool) -> Element<'a, Message> {
    let mut body: Vec<Element<'a, Message>> = vec![
        row![
            text("Video Details").size(19),
            horizontal_space(),
            status_badge(order.status),
        ]
        .align_y(Alignment::Center)
        .into(),
        detail_line("Name", &order.user_name),
        detail_line("Email", &order.user_email),
        detail_line("WhatsApp", &order.user_phone),
        detail_line("Created", &format_date(&order.createdon)),
    ];

    if let Some(done_on) = &order.order_done_on {
        body.push(detail_line("Completed", &format_date(done_on)));
    }
    if let Some(video_url) = &order.video_url {
        body.push(detail_line("Video", video_url));
    }
    if !order.selected_images.is_empty() {
        body.push(
            text(format!("{} images in this order", order.selected_images.len()))
                .size(13)
                .color(super::MUTED)
                .into(),
        );
    }

    let mut actions: Vec<Element<'a, Message>> = Vec::new();
    if order.status.is_retryable() {
        actions.push(
            button(text(if retrying { "Resubmitting..." } else { "Resubmit order" }).size(13))
                .on_press_maybe((!retrying).then_some(Message::RetryPressed(order.order_id)))
                .style(button::primary)
                .into(),
        );
    }
    actions.push(
        button(text("Close").size(13))
            .on_press(Message::OrderDetailsClosed)
            .style(button::text)
            .into(),
    );
    body.push(
        iced::widget::Row::with_children(actions)
            .spacing(10)
            .into(),
    );

    container(Column::with_children(body).spacing(8))
        .padding(16)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

pub fn status_badge<'a>(status: OrderStatus) -> Element<'a, Message> {
    text(status.label()).size(13).color(status_color(status)).into()
}

fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => super::WARNING,
        OrderStatus::Processing => super::ACCENT,
        OrderStatus::Complete => super::SUCCESS,
        OrderStatus::Error => super::DANGER,
        OrderStatus::Unknown => super::MUTED,
    }
}

fn detail_line<'a>(label: &'a str, value: &str) -> Element<'a, Message> {
    row![
        text(label).size(13).color(super::MUTED).width(Length::Fixed(90.0)),
        text(value.to_string()).size(13),
    ]
    .spacing(8)
    .into()
}

/// Render the service's "2025-04-14 06:22:17" timestamps in a readable form
fn format_date(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(parsed) => parsed.format("%d %b %Y, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
