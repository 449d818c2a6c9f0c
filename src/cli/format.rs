use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::session::reveal;
use crate::config;
use crate::display::{self, LiveRegion, Renderer};
use crate::error::Result;
use crate::formatter;
use crate::revealer::Revealer;

/// Render a reply from a file (or stdin) without contacting the backend
pub async fn run(
    config_path: Option<PathBuf>,
    file: Option<PathBuf>,
    animate: bool,
    cadence_ms: Option<u64>,
) -> Result<()> {
    let config = config::resolve(config_path)?;

    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let text = text.trim_end_matches('\n');

    let renderer = Renderer::new(display::should_use_colors(), config.display.caret.clone());
    let mut out = io::stdout();

    if animate && renderer.is_styled() {
        let cadence = cadence_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.display.cadence());
        let mut revealer = Revealer::new();
        let mut region = LiveRegion::new();
        reveal(
            &mut out,
            &renderer,
            &mut revealer,
            &mut region,
            text,
            cadence,
            display::columns(),
        )
        .await?;
    } else {
        display::print_lines(&mut out, &renderer.render_blocks(&formatter::format(text), false))?;
    }

    Ok(())
}
