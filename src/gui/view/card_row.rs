// File: src/gui/view/card_row.rs
use crate::gui::message::Message;
use crate::model::{Card, DATE_FORMAT};

use iced::widget::{button, row, text};
use iced::{Alignment, Element, Length};

pub fn view_card_row(index: usize, card: &Card, confirming: bool) -> Element<'_, Message> {
    let delete: Element<'_, Message> = if confirming {
        row![
            button(text("Yes").size(12))
                .style(button::danger)
                .on_press(Message::ConfirmDelete),
            button(text("No").size(12))
                .style(button::secondary)
                .on_press(Message::CancelDelete),
        ]
        .spacing(4)
        .into()
    } else {
        button(text("Delete").size(12))
            .style(button::danger)
            .on_press(Message::DeleteCard(index))
            .into()
    };

    row![
        text(card.card_name()).width(Length::FillPortion(5)),
        text(card.welcome_points().to_string()).width(Length::FillPortion(2)),
        text(card.opened_date().format(DATE_FORMAT).to_string()).width(Length::FillPortion(2)),
        iced::widget::container(delete).width(Length::FillPortion(1)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
