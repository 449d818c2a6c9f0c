use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use crate::cli::session::Session;
use crate::config;
use crate::error::{Result, VerionError};

/// Send a single prompt (and files) and print the reply
pub async fn run(
    config_path: Option<PathBuf>,
    prompt: Option<String>,
    files: Vec<PathBuf>,
    no_animate: bool,
) -> Result<()> {
    let config = config::resolve(config_path)?;
    let mut session = Session::new(&config, no_animate)?;

    for file in &files {
        session.attach(file).await?;
    }

    let prompt = match prompt {
        Some(prompt) => prompt,
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        None => String::new(),
    };

    let mut out = io::stdout();
    if !session.send(&mut out, &prompt).await? {
        return Err(VerionError::Config(
            "Nothing to send: provide a prompt or at least one --file".to_string(),
        ));
    }

    Ok(())
}
