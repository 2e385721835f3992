use iced::window;

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    PointsChanged(String),
    DateChanged(String),
    AddCard,
    DeleteCard(usize),
    ConfirmDelete,
    CancelDelete,
    Save,
    Reload,
    CloseRequested(window::Id),
}
