use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::code::content::iso_date;
use crate::state::about::{AboutLink, CREATOR};
use crate::state::data::DisplayScreenState;
use crate::ui::overlay::modal;
use crate::Message;

/// Width of the side menu
const DRAWER_WIDTH: f32 = 200.0;

/// Code screen: header, optional side menu, the code and today's date.
///
/// `texture` is the current code converted for the GPU; `None` when
/// encoding failed.
pub fn view<'a>(
    state: &'a DisplayScreenState,
    texture: Option<&'a image::Handle>,
    preview_size: f32,
) -> Element<'a, Message> {
    let header = row![
        button("Menu").on_press(Message::ToggleDrawer),
        text("QRC Generator PySpider").size(24),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let code: Element<'a, Message> = match texture {
        Some(handle) => column![
            image(handle.clone())
                .width(Length::Fixed(preview_size))
                .height(Length::Fixed(preview_size)),
            text(format!("Date: {}", iso_date(state.code.date))).size(18),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into(),
        None => {
            let reason = state
                .code
                .error()
                .map(|e| e.to_string())
                .unwrap_or_default();
            column![
                text("Error generating QR Code").size(18),
                text(reason).size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into()
        }
    };

    let code_area = container(code)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

    let body: Element<'a, Message> = if state.drawer_open {
        row![drawer(), code_area].spacing(12).into()
    } else {
        code_area.into()
    };

    let base = container(column![header, body].spacing(16).padding(16))
        .width(Length::Fill)
        .height(Length::Fill);

    if state.about_dialog_visible {
        modal(base, about_dialog(), Message::CloseAbout)
    } else {
        base.into()
    }
}

fn drawer() -> Element<'static, Message> {
    let entries = column![
        button("Change QR Text")
            .on_press(Message::ChangeText)
            .style(button::text)
            .width(Length::Fill),
        button("About")
            .on_press(Message::OpenAbout)
            .style(button::text)
            .width(Length::Fill),
    ]
    .spacing(8)
    .padding(12);

    container(entries)
        .width(Length::Fixed(DRAWER_WIDTH))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn about_dialog() -> Element<'static, Message> {
    let mut content = column![text("About").size(22), text(CREATOR)]
        .spacing(8)
        .padding(10)
        .width(Length::Fixed(360.0));

    for link in AboutLink::ALL {
        content = content.push(
            button(text(link.label()))
                .style(button::text)
                .on_press(Message::OpenLink(link)),
        );
    }

    content = content.push(row![
        Space::with_width(Length::Fill),
        button("Close").on_press(Message::CloseAbout),
    ]);

    container(content).style(container::rounded_box).into()
}
