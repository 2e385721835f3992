// File: ./src/tui/mod.rs
pub mod action;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::logging;
use crate::store::Store;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::{io, time::Duration};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config.log_file())?;

    let store = Store::new(config.data_file());
    tracing::info!("Starting TUI with data file {}", store.path().display());
    let loaded = store.load();
    let mut state = AppState::new(loaded.collection, config.confirm_delete);
    state.message = format!(
        "{} card(s) from {}",
        state.cards.len(),
        store.path().display()
    );
    state.report_warnings(&loaded.warnings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut state, &store, &config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    store: &Store,
    config: &Config,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollDown => state.next(),
                MouseEventKind::ScrollUp => state.previous(),
                _ => {}
            },
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = state.handle_key(key)
                    && !apply(state, store, config.save_on_exit, action)
                {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

/// Writes the collection, recording the outcome in the status line.
fn persist(state: &mut AppState, store: &Store) -> bool {
    match store.save(&state.cards) {
        Ok(()) => {
            state.dirty = false;
            true
        }
        Err(e) => {
            state.message = format!("Error: {}. Press s to retry.", e);
            false
        }
    }
}

/// Carries out an action against the collection and the data file.
/// Returns `false` once the app should exit.
pub fn apply(state: &mut AppState, store: &Store, save_on_exit: bool, action: Action) -> bool {
    if action != Action::Quit {
        state.quit_armed = false;
    }
    match action {
        Action::AddCard { name, points, date } => match state.cards.add(&name, &points, &date) {
            Ok(card) => {
                let added = card.card_name().to_string();
                state.dirty = true;
                state.table_state.select(Some(state.cards.len() - 1));
                if persist(state, store) {
                    state.message = format!("Card added: {}", added);
                }
            }
            Err(e) => state.message = format!("Invalid input: {}", e),
        },
        Action::DeleteCard(index) => match state.cards.remove(index) {
            Ok(card) => {
                state.dirty = true;
                state.clamp_selection();
                if persist(state, store) {
                    state.message = format!("Deleted '{}'", card.card_name());
                }
            }
            Err(e) => state.message = format!("Error: {}", e),
        },
        Action::Save => {
            if persist(state, store) {
                state.message = format!("Saved to {}", store.path().display());
            }
        }
        Action::Reload => {
            if state.dirty {
                state.message = "Unsaved changes: press s to save before reloading.".to_string();
            } else {
                let loaded = store.load();
                state.set_cards(loaded.collection);
                state.message = format!("Reloaded {} card(s)", state.cards.len());
                state.report_warnings(&loaded.warnings);
            }
        }
        Action::Quit => {
            if !state.dirty || !save_on_exit || state.quit_armed {
                return false;
            }
            if persist(state, store) {
                return false;
            }
            state.quit_armed = true;
            state.message = format!("{} Press q again to quit without saving.", state.message);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Collection;
    use std::fs;

    fn add(name: &str, points: &str, date: &str) -> Action {
        Action::AddCard {
            name: name.to_string(),
            points: points.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_add_and_delete_are_saved_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("cards.json"));
        let mut state = AppState::new(Collection::new(), true);

        assert!(apply(&mut state, &store, true, add("Amex Gold", "75000", "2025-11-20")));
        assert!(apply(&mut state, &store, true, add("Citi Premier", "60000", "2025-02-01")));
        assert!(!state.dirty);
        assert_eq!(store.load().collection.len(), 2);

        assert!(apply(&mut state, &store, true, Action::DeleteCard(0)));
        let reloaded = store.load().collection;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].card_name(), "Citi Premier");
    }

    #[test]
    fn test_invalid_add_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("cards.json"));
        let mut state = AppState::new(Collection::new(), true);

        assert!(apply(&mut state, &store, true, add("", "1000", "2025-01-01")));
        assert!(state.cards.is_empty());
        assert!(!store.path().exists());
        assert!(state.message.contains("card name cannot be empty"));
    }

    #[test]
    fn test_failed_save_keeps_cards_and_arms_quit() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be makes every save fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = Store::new(blocker.join("cards.json"));
        let mut state = AppState::new(Collection::new(), true);

        assert!(apply(&mut state, &store, true, add("Amex Gold", "75000", "2025-11-20")));
        assert!(state.dirty);
        assert_eq!(state.cards.len(), 1);
        assert!(state.message.starts_with("Error:"));

        // First quit tries to save and stays, second one leaves
        assert!(apply(&mut state, &store, true, Action::Quit));
        assert!(state.quit_armed);
        assert!(!apply(&mut state, &store, true, Action::Quit));
    }

    #[test]
    fn test_reload_refuses_with_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        let store = Store::new(&path);
        let mut state = AppState::new(Collection::new(), true);
        state.dirty = true;

        fs::write(&path, r#"[{"card_name": "X", "welcome_points": 1, "opened_date": "2025-01-01"}]"#)
            .unwrap();
        assert!(apply(&mut state, &store, true, Action::Reload));
        assert!(state.cards.is_empty());

        state.dirty = false;
        assert!(apply(&mut state, &store, true, Action::Reload));
        assert_eq!(state.cards.len(), 1);
    }
}
