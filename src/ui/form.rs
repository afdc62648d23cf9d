use iced::widget::{button, container, row, text, text_input, Column};
use iced::{Element, Length};

use crate::state::data::ContactDetails;
use crate::state::form::{validate_email, validate_name, validate_whatsapp, ValidationError};
use crate::Message;

/// The contact form with inline validation messages
///
/// Field errors only appear after the first submit attempt so the form
/// does not shout at an empty field the user has not reached yet. Entered
/// values survive a failed submission untouched.
pub fn contact_form<'a>(
    contact: &'a ContactDetails,
    show_errors: bool,
    submitting: bool,
    submit_error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut body: Vec<Element<'a, Message>> = vec![
        text("Final Step: Get Your Video").size(21).into(),
        text("We will need your contact details to send you the video.")
            .size(13)
            .color(super::MUTED)
            .into(),
    ];

    if let Some(error) = submit_error {
        body.push(
            container(text(error).size(13).color(super::DANGER))
                .padding(8)
                .width(Length::Fill)
                .style(container::bordered_box)
                .into(),
        );
    }

    body.push(field(
        "Full Name",
        text_input("Elon Musk", &contact.name)
            .on_input(Message::NameChanged)
            .padding(10),
        show_errors.then(|| validate_name(&contact.name).err()).flatten(),
    ));
    body.push(field(
        "WhatsApp Number",
        text_input("+91 98765 43210", &contact.whatsapp)
            .on_input(Message::WhatsappChanged)
            .padding(10),
        show_errors
            .then(|| validate_whatsapp(&contact.whatsapp).err())
            .flatten(),
    ));
    body.push(field(
        "Email Address",
        text_input("you@example.com", &contact.email)
            .on_input(Message::EmailChanged)
            .padding(10),
        show_errors.then(|| validate_email(&contact.email).err()).flatten(),
    ));

    body.push(
        row![
            button(text(if submitting { "Processing..." } else { "Submit & Generate" }).size(14))
                .on_press_maybe((!submitting).then_some(Message::SubmitPressed))
                .style(button::primary)
                .padding(10),
            button(text("Cancel").size(13))
                .on_press(Message::ContactFormClosed)
                .style(button::text),
        ]
        .spacing(10)
        .into(),
    );

    container(Column::with_children(body).spacing(12).max_width(480.0))
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn field<'a>(
    label: &'a str,
    input: text_input::TextInput<'a, Message>,
    error: Option<ValidationError>,
) -> Element<'a, Message> {
    let mut parts: Vec<Element<'a, Message>> =
        vec![text(label).size(13).into(), input.into()];
    if let Some(error) = error {
        parts.push(text(error.to_string()).size(12).color(super::DANGER).into());
    }
    Column::with_children(parts).spacing(4).into()
}
