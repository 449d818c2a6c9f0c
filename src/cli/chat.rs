use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::session::Session;
use crate::config::{self, Config};
use crate::error::Result;
use crate::history;

const HELP: &str = "\
Commands:
  /attach <path>   queue a file for the next message
  /detach [name]   drop a queued file (all when no name is given)
  /new             save this chat and start a new one
  /help            show this help
  /quit            save and exit";

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    Attach(&'a str),
    Detach(Option<&'a str>),
    NewChat,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (command, None),
    };

    match (name, arg) {
        ("attach", Some(path)) => Input::Attach(path),
        ("detach", arg) => Input::Detach(arg),
        ("new", None) => Input::NewChat,
        ("help", None) => Input::Help,
        ("quit" | "exit", None) => Input::Quit,
        _ => Input::Unknown(line),
    }
}

/// Interactive chat loop on stdin
pub async fn run(config_path: Option<PathBuf>, no_animate: bool) -> Result<()> {
    let config = config::resolve(config_path)?;
    let mut session = Session::new(&config, no_animate)?;
    let mut out = io::stdout();

    session.print_transcript(&mut out)?;
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_input(&line) {
            Input::Message(prompt) => {
                session.send(&mut out, prompt).await?;
            }
            Input::Attach(path) => match session.attach(Path::new(path)).await {
                Ok(info) => println!("Attached {}", info.label()),
                Err(e) => eprintln!("{}", e),
            },
            Input::Detach(name) => {
                let removed = session.detach(name);
                println!(
                    "Removed {} file(s), {} queued",
                    removed,
                    session.attachments().len()
                );
            }
            Input::NewChat => {
                save_if_used(&session, &config);
                session.new_chat();
                session.print_transcript(&mut out)?;
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Unknown(line) => eprintln!("Unknown command: {} (try /help)", line),
        }
    }

    let queued = session.attachments().len();
    if queued > 0 {
        eprintln!("Discarded {} queued file(s)", queued);
    }
    save_if_used(&session, &config);
    Ok(())
}

fn save_if_used(session: &Session, config: &Config) {
    if !session.conversation.has_exchanges() {
        return;
    }
    match history::save(&session.conversation, &config.history_dir) {
        Ok(path) => println!("Chat saved to: {}", path.display()),
        Err(e) => eprintln!("Warning: could not save chat ({})", e),
    }
}
