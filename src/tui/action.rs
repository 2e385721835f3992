/// What a key press asks the app to do with the collection or the file.
/// Pure UI changes (moving the cursor, typing) never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddCard {
        name: String,
        points: String,
        date: String,
    },
    DeleteCard(usize),
    Save,
    Reload,
    Quit,
}
