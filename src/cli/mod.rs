//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - config init: Initialize configuration file
//! - ask: Send one prompt and show the reply
//! - chat: Interactive conversation
//! - format: Render a reply locally
//! - history latest: Display the most recent saved chat

pub mod ask;
pub mod chat;
pub mod config;
pub mod format;
pub mod history;
pub mod session;
