// File: ./src/gui/mod.rs
pub mod message;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::logging;
use anyhow::{Result, anyhow};
use iced::{Task, Theme};
use state::GuiApp;

pub fn run() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config.log_file())?;

    let app = GuiApp::load(&config);
    tracing::info!("Starting GUI with data file {}", app.store.path().display());

    iced::application("Welcome Bonus Tracker", GuiApp::update, view::view)
        .subscription(GuiApp::subscription)
        .exit_on_close_request(false)
        .theme(|_: &GuiApp| Theme::Dark)
        .window_size((900.0, 500.0))
        .run_with(move || (app, Task::none()))
        .map_err(|e| anyhow!("GUI failed: {}", e))
}
