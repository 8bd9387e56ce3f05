use iced::widget::{button, column, container, image, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::state::data::InputScreenState;
use crate::state::help::{HelpCarousel, HELP_IMAGE_COUNT};
use crate::ui::overlay::modal;
use crate::Message;

/// Edge length of a help image on screen
const HELP_IMAGE_SIZE: f32 = 360.0;

/// Text entry screen, with the help carousel on top when open
pub fn view<'a>(state: &'a InputScreenState, status: Option<&'a str>) -> Element<'a, Message> {
    let header = row![
        text("Enter QR Text").size(24),
        Space::with_width(Length::Fill),
        button("?").on_press(Message::OpenHelp),
    ]
    .align_y(Alignment::Center);

    let field = text_input("QR Code Text", &state.draft_text)
        .on_input(Message::DraftChanged)
        .on_submit(Message::Save)
        .padding(10);

    let save = button("Save")
        .on_press(Message::Save)
        .width(Length::Fill)
        .padding(10);

    let mut body = column![header, Space::with_height(Length::Fill), field, save]
        .spacing(16)
        .padding(16);

    if let Some(status) = status {
        body = body.push(text(status).size(14));
    }
    body = body.push(Space::with_height(Length::Fill));

    let base = container(body).width(Length::Fill).height(Length::Fill);

    match state.help {
        Some(help) => modal(base, help_dialog(help), Message::CloseHelp),
        None => base.into(),
    }
}

fn help_dialog(help: HelpCarousel) -> Element<'static, Message> {
    let page = help.page();

    // Arrows only where a move is possible
    let previous: Element<'static, Message> = if help.has_previous() {
        button("← Previous").on_press(Message::PreviousHelp).into()
    } else {
        Space::with_width(Length::Shrink).into()
    };
    let next: Element<'static, Message> = if help.has_next() {
        button("Next →").on_press(Message::NextHelp).into()
    } else {
        Space::with_width(Length::Shrink).into()
    };

    let content = column![
        image(image::Handle::from_bytes(page.image))
            .width(Length::Fixed(HELP_IMAGE_SIZE))
            .height(Length::Fixed(HELP_IMAGE_SIZE)),
        text(page.caption).size(18),
        text(format!("{} / {}", help.index() + 1, HELP_IMAGE_COUNT)).size(12),
        row![previous, Space::with_width(Length::Fill), next],
        row![
            Space::with_width(Length::Fill),
            button("Close").on_press(Message::CloseHelp),
        ],
    ]
    .spacing(10)
    .padding(10)
    .width(Length::Fixed(HELP_IMAGE_SIZE + 40.0));

    container(content).style(container::rounded_box).into()
}
