use crate::config::Config;
use crate::gui::message::Message;
use crate::store::{Collection, Store};
use iced::{Subscription, Task, window};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct GuiApp {
    pub store: Store,
    pub cards: Collection,
    pub name_input: String,
    pub points_input: String,
    pub date_input: String,
    pub status: Option<Status>,
    /// Row waiting for the user to confirm its deletion.
    pub pending_delete: Option<usize>,
    pub confirm_delete: bool,
    pub save_on_exit: bool,
    /// Cards changed since the last successful save.
    pub dirty: bool,
    /// A save on close failed; the next close request leaves anyway.
    pub close_armed: bool,
}

impl GuiApp {
    pub fn new(store: Store, cards: Collection, confirm_delete: bool, save_on_exit: bool) -> Self {
        Self {
            store,
            cards,
            name_input: String::new(),
            points_input: String::new(),
            date_input: String::new(),
            status: None,
            pending_delete: None,
            confirm_delete,
            save_on_exit,
            dirty: false,
            close_armed: false,
        }
    }

    pub fn load(config: &Config) -> Self {
        let store = Store::new(config.data_file());
        let loaded = store.load();
        let mut app = Self::new(
            store,
            loaded.collection,
            config.confirm_delete,
            config.save_on_exit,
        );
        if let Some(first) = loaded.warnings.first() {
            app.status = Some(Status::Error(format!(
                "Warning: {} ({} problem(s), see log)",
                first,
                loaded.warnings.len()
            )));
        }
        app
    }

    fn persist(&mut self, done: String) -> bool {
        match self.store.save(&self.cards) {
            Ok(()) => {
                self.dirty = false;
                self.status = Some(Status::Info(done));
                true
            }
            Err(e) => {
                self.status = Some(Status::Error(format!("Failed to save: {}", e)));
                false
            }
        }
    }

    fn delete(&mut self, index: usize) {
        self.pending_delete = None;
        match self.cards.remove(index) {
            Ok(card) => {
                self.dirty = true;
                self.persist(format!("Card '{}' deleted", card.card_name()));
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    /// Decides what a window close request does. Returns `true` once the
    /// window may close: nothing is pending, saving on exit is off, the
    /// pending cards were just saved, or a previous attempt already failed.
    pub fn close_requested(&mut self) -> bool {
        if !self.dirty || !self.save_on_exit || self.close_armed {
            return true;
        }
        let done = format!("Cards saved to {}", self.store.path().display());
        if self.persist(done) {
            return true;
        }
        tracing::warn!("Save on close failed, waiting for a second close request");
        self.close_armed = true;
        if let Some(Status::Error(msg)) = &mut self.status {
            msg.push_str(". Close again to quit without saving.");
        }
        false
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(Message::CloseRequested)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::CloseRequested(_)) {
            self.close_armed = false;
        }
        match message {
            Message::NameChanged(value) => self.name_input = value,
            Message::PointsChanged(value) => self.points_input = value,
            Message::DateChanged(value) => self.date_input = value,

            Message::AddCard => {
                match self
                    .cards
                    .add(&self.name_input, &self.points_input, &self.date_input)
                {
                    Ok(card) => {
                        let done = format!("Card '{}' added", card.card_name());
                        self.name_input.clear();
                        self.points_input.clear();
                        self.date_input.clear();
                        self.dirty = true;
                        self.persist(done);
                    }
                    Err(e) => self.status = Some(Status::Error(format!("Validation error: {}", e))),
                }
            }

            Message::DeleteCard(index) => {
                if self.confirm_delete {
                    self.pending_delete = Some(index);
                } else {
                    self.delete(index);
                }
            }
            Message::ConfirmDelete => {
                if let Some(index) = self.pending_delete {
                    self.delete(index);
                }
            }
            Message::CancelDelete => self.pending_delete = None,

            Message::Save => {
                let done = format!("Cards saved to {}", self.store.path().display());
                self.persist(done);
            }
            Message::Reload if self.dirty => {
                self.status = Some(Status::Error(
                    "Unsaved changes: save before reloading.".to_string(),
                ));
            }
            Message::Reload => {
                let loaded = self.store.load();
                self.cards = loaded.collection;
                self.pending_delete = None;
                self.status = Some(match loaded.warnings.first() {
                    Some(w) => Status::Error(format!("Warning: {}", w)),
                    None => Status::Info(format!("Reloaded {} card(s)", self.cards.len())),
                });
            }
            Message::CloseRequested(id) => {
                if self.close_requested() {
                    return window::close(id);
                }
            }
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_in(dir: &tempfile::TempDir, confirm_delete: bool) -> GuiApp {
        GuiApp::new(
            Store::new(dir.path().join("cards.json")),
            Collection::new(),
            confirm_delete,
            true,
        )
    }

    /// An app whose saves always fail: a regular file sits where the data
    /// directory should be.
    fn unsavable_app(dir: &tempfile::TempDir) -> GuiApp {
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        GuiApp::new(
            Store::new(blocker.join("cards.json")),
            Collection::new(),
            true,
            true,
        )
    }

    fn fill(app: &mut GuiApp, name: &str, points: &str, date: &str) {
        let _ = app.update(Message::NameChanged(name.to_string()));
        let _ = app.update(Message::PointsChanged(points.to_string()));
        let _ = app.update(Message::DateChanged(date.to_string()));
    }

    #[test]
    fn test_add_saves_and_clears_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        fill(&mut app, "Amex Gold", "75000", "2025-11-20");
        let _ = app.update(Message::AddCard);

        assert!(app.name_input.is_empty());
        assert!(matches!(app.status, Some(Status::Info(_))));
        assert_eq!(app.store.load().collection.len(), 1);
    }

    #[test]
    fn test_invalid_add_keeps_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        fill(&mut app, "Amex Gold", "lots", "2025-11-20");
        let _ = app.update(Message::AddCard);

        assert_eq!(app.points_input, "lots");
        assert!(app.cards.is_empty());
        assert_eq!(
            app.status,
            Some(Status::Error(
                "Validation error: welcome points must be a positive integer".to_string()
            ))
        );
    }

    #[test]
    fn test_delete_waits_for_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        fill(&mut app, "Amex Gold", "75000", "2025-11-20");
        let _ = app.update(Message::AddCard);

        let _ = app.update(Message::DeleteCard(0));
        assert_eq!(app.pending_delete, Some(0));
        assert_eq!(app.cards.len(), 1);

        let _ = app.update(Message::CancelDelete);
        assert_eq!(app.cards.len(), 1);

        let _ = app.update(Message::DeleteCard(0));
        let _ = app.update(Message::ConfirmDelete);
        assert!(app.cards.is_empty());
        assert!(app.store.load().collection.is_empty());
    }

    #[test]
    fn test_reload_keeps_unsaved_cards() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = unsavable_app(&dir);
        fill(&mut app, "Amex Gold", "75000", "2025-11-20");
        let _ = app.update(Message::AddCard);
        assert!(app.dirty);
        assert!(matches!(app.status, Some(Status::Error(_))));

        let _ = app.update(Message::Reload);
        assert_eq!(app.cards.len(), 1);
        assert_eq!(
            app.status,
            Some(Status::Error(
                "Unsaved changes: save before reloading.".to_string()
            ))
        );
    }

    #[test]
    fn test_reload_after_save_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        fill(&mut app, "Amex Gold", "75000", "2025-11-20");
        let _ = app.update(Message::AddCard);
        assert!(!app.dirty);

        std::fs::write(
            app.store.path(),
            r#"[{"card_name": "X", "welcome_points": 1, "opened_date": "2025-01-01"}]"#,
        )
        .unwrap();
        let _ = app.update(Message::Reload);
        assert_eq!(app.cards.len(), 1);
        assert_eq!(app.cards[0].card_name(), "X");
    }

    #[test]
    fn test_close_saves_pending_cards() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        app.cards.add("Amex Gold", 75000, "2025-11-20").unwrap();
        app.dirty = true;

        assert!(app.close_requested());
        assert!(!app.dirty);
        assert_eq!(app.store.load().collection.len(), 1);
    }

    #[test]
    fn test_close_without_changes_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        assert!(app.close_requested());
        assert!(!app.store.path().exists());
    }

    #[test]
    fn test_close_respects_save_on_exit_off() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, true);
        app.save_on_exit = false;
        app.cards.add("Amex Gold", 75000, "2025-11-20").unwrap();
        app.dirty = true;

        assert!(app.close_requested());
        assert!(!app.store.path().exists());
    }

    #[test]
    fn test_failed_close_save_needs_second_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = unsavable_app(&dir);
        fill(&mut app, "Amex Gold", "75000", "2025-11-20");
        let _ = app.update(Message::AddCard);

        // First request tries to save and stays open
        assert!(!app.close_requested());
        assert!(app.close_armed);
        assert_eq!(app.cards.len(), 1);
        match &app.status {
            Some(Status::Error(msg)) => assert!(msg.ends_with("Close again to quit without saving.")),
            other => panic!("expected an error status, got {:?}", other),
        }

        // Any other interaction disarms it
        let _ = app.update(Message::NameChanged("x".to_string()));
        assert!(!app.close_armed);

        assert!(!app.close_requested());
        assert!(app.close_requested());
    }
}
