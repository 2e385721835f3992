use anyhow::Result;

fn main() -> Result<()> {
    bonuslog::tui::run()
}
