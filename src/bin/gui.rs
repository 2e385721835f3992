use anyhow::Result;

fn main() -> Result<()> {
    bonuslog::gui::run()
}
