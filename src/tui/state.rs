use crate::error::Field;
use crate::model::{validate_date, validate_name, validate_points};
use crate::store::{Collection, LoadWarning};
use crate::tui::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

pub const HELP_TEXT: &str = "a:Add | d:Del | s:Save | r:Reload | q:Quit";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Collecting one field of a new card.
    Adding(Field),
    ConfirmDelete(usize),
}

#[derive(Debug, Default, Clone)]
struct AddForm {
    name: String,
    points: String,
}

pub struct AppState {
    pub cards: Collection,
    pub table_state: TableState,
    pub mode: InputMode,
    pub message: String,
    pub input_buffer: String,
    pub cursor_position: usize,
    /// In-memory changes not yet on disk.
    pub dirty: bool,
    /// A save-on-quit failed; the next quit goes through regardless.
    pub quit_armed: bool,
    pub confirm_delete: bool,
    form: AddForm,
}

impl AppState {
    pub fn new(cards: Collection, confirm_delete: bool) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            cards,
            table_state,
            mode: InputMode::Normal,
            message: HELP_TEXT.to_string(),
            input_buffer: String::new(),
            cursor_position: 0,
            dirty: false,
            quit_armed: false,
            confirm_delete,
            form: AddForm::default(),
        }
    }

    pub fn report_warnings(&mut self, warnings: &[LoadWarning]) {
        match warnings {
            [] => {}
            [only] => self.message = format!("Warning: {}", only),
            [first, rest @ ..] => {
                self.message = format!("Warning: {} (+{} more, see log)", first, rest.len())
            }
        }
    }

    /// Swaps in a freshly loaded collection and keeps the selection in range.
    pub fn set_cards(&mut self, cards: Collection) {
        self.cards = cards;
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        let len = self.cards.len();
        let sel = self.table_state.selected().unwrap_or(0);
        if len == 0 {
            self.table_state.select(Some(0));
        } else if sel >= len {
            self.table_state.select(Some(len - 1));
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|&idx| idx < self.cards.len())
    }

    pub fn prompt(&self) -> &'static str {
        match self.mode {
            InputMode::Adding(Field::CardName) => "Card name (e.g., Chase Sapphire Preferred)",
            InputMode::Adding(Field::WelcomePoints) => "Welcome offer points (positive number)",
            InputMode::Adding(Field::OpenedDate) => "Date opened (YYYY-MM-DD, e.g., 2025-11-28)",
            _ => "",
        }
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len())
    }
    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input_buffer.insert(index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    pub fn next(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
    pub fn previous(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
    pub fn jump_forward(&mut self, step: usize) {
        if self.cards.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = (current + step).min(self.cards.len() - 1);
        self.table_state.select(Some(new_index));
    }
    pub fn jump_backward(&mut self, step: usize) {
        if self.cards.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.table_state.select(Some(new_index));
    }

    /// Maps a key press onto state changes, returning the action the run
    /// loop must carry out against the store, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }
        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Adding(field) => self.handle_adding_key(field, key),
            InputMode::ConfirmDelete(index) => {
                self.mode = InputMode::Normal;
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::DeleteCard(index)),
                    _ => {
                        self.message = "Delete cancelled.".to_string();
                        None
                    }
                }
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('s') => return Some(Action::Save),
            KeyCode::Char('r') => return Some(Action::Reload),
            KeyCode::Char('a') => {
                self.form = AddForm::default();
                self.reset_input();
                self.mode = InputMode::Adding(Field::CardName);
                self.message = self.prompt().to_string();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let idx = self.selected_index()?;
                if !self.confirm_delete {
                    return Some(Action::DeleteCard(idx));
                }
                self.message = format!("Delete '{}'? (y/n)", self.cards[idx].card_name());
                self.mode = InputMode::ConfirmDelete(idx);
            }
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.jump_forward(10),
            KeyCode::PageUp => self.jump_backward(10),
            _ => {}
        }
        None
    }

    fn handle_adding_key(&mut self, field: Field, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.reset_input();
                self.message = "Add cancelled.".to_string();
            }
            KeyCode::Enter => {
                let raw = self.input_buffer.clone();
                let checked = match field {
                    Field::CardName => validate_name(&raw).map(|_| ()),
                    Field::WelcomePoints => validate_points(&raw).map(|_| ()),
                    Field::OpenedDate => validate_date(&raw).map(|_| ()),
                };
                if let Err(e) = checked {
                    self.message = format!("Invalid input: {}. {}", e, self.prompt());
                    return None;
                }
                self.reset_input();
                match field {
                    Field::CardName => {
                        self.form.name = raw;
                        self.mode = InputMode::Adding(Field::WelcomePoints);
                    }
                    Field::WelcomePoints => {
                        self.form.points = raw;
                        self.mode = InputMode::Adding(Field::OpenedDate);
                    }
                    Field::OpenedDate => {
                        self.mode = InputMode::Normal;
                        let form = std::mem::take(&mut self.form);
                        return Some(Action::AddCard {
                            name: form.name,
                            points: form.points,
                            date: raw,
                        });
                    }
                }
                self.message = self.prompt().to_string();
            }
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            _ => {}
        }
        None
    }
}
