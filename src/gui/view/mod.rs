pub mod card_row;

use crate::gui::message::Message;
use crate::gui::state::{GuiApp, Status};
use card_row::view_card_row;

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Color, Element, Length};

pub fn view(app: &GuiApp) -> Element<'_, Message> {
    let title = text("Credit Card Welcome Bonus Tracker").size(28);

    let header = row![
        text("Card Name").width(Length::FillPortion(5)),
        text("Points").width(Length::FillPortion(2)),
        text("Opened").width(Length::FillPortion(2)),
        text("").width(Length::FillPortion(1)),
    ]
    .spacing(10);

    let cards_view: Element<_> = if app.cards.is_empty() {
        text("No cards tracked yet. Add one below!").into()
    } else {
        column(
            app.cards
                .iter()
                .enumerate()
                .map(|(i, card)| view_card_row(i, card, app.pending_delete == Some(i)))
                .collect::<Vec<_>>(),
        )
        .spacing(6)
        .into()
    };

    let totals = text(format!(
        "Total: {} card(s), {} points{}",
        app.cards.len(),
        app.cards.total_points(),
        if app.dirty { " (unsaved changes)" } else { "" }
    ))
    .size(14);

    let form = row![
        text_input("Card name (e.g., Chase Sapphire Preferred)", &app.name_input)
            .on_input(Message::NameChanged)
            .on_submit(Message::AddCard)
            .padding(8)
            .width(Length::FillPortion(5)),
        text_input("Welcome points", &app.points_input)
            .on_input(Message::PointsChanged)
            .on_submit(Message::AddCard)
            .padding(8)
            .width(Length::FillPortion(2)),
        text_input("YYYY-MM-DD", &app.date_input)
            .on_input(Message::DateChanged)
            .on_submit(Message::AddCard)
            .padding(8)
            .width(Length::FillPortion(2)),
        button(text("Add Card"))
            .on_press(Message::AddCard)
            .width(Length::FillPortion(1)),
    ]
    .spacing(10);

    let actions = row![
        button(text("Save")).on_press(Message::Save),
        button(text("Reload"))
            .style(button::secondary)
            .on_press(Message::Reload),
    ]
    .spacing(10);

    let status: Element<_> = match &app.status {
        Some(Status::Info(msg)) => text(msg.as_str()).color(Color::from_rgb(0.3, 0.8, 0.4)).into(),
        Some(Status::Error(msg)) => text(msg.as_str()).color(Color::from_rgb(0.9, 0.3, 0.3)).into(),
        None => text("").into(),
    };

    let content = column![
        title,
        header,
        scrollable(cards_view).height(Length::Fill),
        totals,
        form,
        actions,
        status,
    ]
    .spacing(12)
    .max_width(900);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .padding(20)
        .into()
}
