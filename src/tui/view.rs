use crate::model::DATE_FORMAT;
use crate::tui::state::{AppState, HELP_TEXT, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    // --- Card Table ---
    let header = Row::new(vec!["Card Name", "Points", "Opened"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));
    let rows: Vec<Row> = state
        .cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(card.card_name().to_string()),
                Cell::from(card.welcome_points().to_string()),
                Cell::from(card.opened_date().format(DATE_FORMAT).to_string()),
            ])
        })
        .collect();

    let unsaved = if state.dirty { " [unsaved]" } else { "" };
    let title = format!(
        " Welcome Bonuses ({} card(s), {} pts){} ",
        state.cards.len(),
        state.cards.total_points(),
        unsaved
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray),
    );

    if state.cards.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No cards tracked yet. Press 'a' to add one."),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Welcome Bonuses "));
        f.render_widget(empty, v_chunks[0]);
    } else {
        f.render_stateful_widget(table, v_chunks[0], &mut state.table_state);
    }

    // --- Footer / Input ---
    let footer_area = v_chunks[1];
    match state.mode {
        InputMode::Adding(_) => {
            let prefix = "> ";
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", state.message)),
                );
            f.render_widget(input, footer_area);
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::ConfirmDelete(_) => {
            let confirm = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title(" Confirm "));
            f.render_widget(confirm, footer_area);
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help = Paragraph::new(HELP_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}
