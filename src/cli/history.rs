use std::io;
use std::path::PathBuf;

use crate::config;
use crate::display::{self, Renderer};
use crate::error::Result;
use crate::history;

/// Display the most recent saved chat
pub fn latest(config_path: Option<PathBuf>) -> Result<()> {
    let config = config::resolve(config_path)?;
    let conversation = history::latest(&config.history_dir)?;

    let renderer = Renderer::new(display::should_use_colors(), config.display.caret);
    let mut out = io::stdout();
    for message in &conversation.messages {
        display::print_lines(&mut out, &renderer.render_message(message))?;
        println!();
    }

    Ok(())
}
