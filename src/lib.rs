pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "gui")]
pub mod gui;

pub use error::{BonusError, Field, Result, ValidationError};
pub use model::Card;
pub use store::{Collection, LoadWarning, Loaded, Store};
