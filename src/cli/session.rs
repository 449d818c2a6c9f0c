use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::config::Config;
use crate::display::{self, LiveRegion, Renderer};
use crate::error::{Result, VerionError};
use crate::formatter;
use crate::inference::{Attachment, InferenceClient};
use crate::models::{compose_user_text, Conversation, FileInfo, MessagePhase};
use crate::revealer::Revealer;

/// One chat with the assistant: transcript, queued files and the reveal
/// timer of the latest reply.
pub struct Session {
    pub conversation: Conversation,
    client: InferenceClient,
    renderer: Renderer,
    revealer: Revealer,
    animate: bool,
    cadence: Duration,
    attachments: Vec<Attachment>,
}

impl Session {
    pub fn new(config: &Config, no_animate: bool) -> Result<Self> {
        let renderer = Renderer::new(display::should_use_colors(), config.display.caret.clone());
        // Redrawing in place needs a real terminal
        let animate = config.display.animate && !no_animate && renderer.is_styled();

        Ok(Self {
            conversation: Conversation::new(),
            client: InferenceClient::new(&config.inference)?,
            renderer,
            revealer: Revealer::new(),
            animate,
            cadence: config.display.cadence(),
            attachments: Vec::new(),
        })
    }

    /// Queue a file for the next message
    pub async fn attach(&mut self, path: &Path) -> Result<FileInfo> {
        let attachment = Attachment::load(path).await?;
        let info = attachment.info();
        self.attachments.push(attachment);
        Ok(info)
    }

    /// Remove queued files by name, or all of them. Returns how many were removed.
    pub fn detach(&mut self, name: Option<&str>) -> usize {
        let before = self.attachments.len();
        match name {
            Some(name) => self.attachments.retain(|a| a.name != name),
            None => self.attachments.clear(),
        }
        before - self.attachments.len()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Start over with only the greeting
    pub fn new_chat(&mut self) {
        if self.revealer.is_active() {
            tracing::debug!("dropping reveal in progress");
        }
        self.revealer.cancel();
        self.conversation.new_chat();
        self.attachments.clear();
    }

    /// Print every message of the transcript statically
    pub fn print_transcript<W: Write>(&self, out: &mut W) -> Result<()> {
        for message in &self.conversation.messages {
            display::print_lines(out, &self.renderer.render_message(message))?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Send a prompt with the queued files and show the reply.
    ///
    /// Returns `false` when there was nothing to send.
    pub async fn send<W: Write>(&mut self, out: &mut W, prompt: &str) -> Result<bool> {
        let Some(text) = compose_user_text(prompt, self.attachments.len()) else {
            return Ok(false);
        };

        let attachments = std::mem::take(&mut self.attachments);
        let info = attachments.first().map(Attachment::info);
        let user_id = self.conversation.push_user(text.clone(), info);
        if let Some(message) = self.conversation.get(user_id) {
            display::print_lines(out, &self.renderer.render_message(message))?;
            writeln!(out)?;
        }

        let reply_id = self.conversation.push_pending();
        let columns = display::columns();
        let mut region = LiveRegion::new();
        if let Some(message) = self.conversation.get(reply_id) {
            display::print_lines(out, &self.renderer.render_header(message))?;
        }
        if self.renderer.is_styled() {
            region.draw(out, &self.renderer.render_pending(), columns)?;
        } else {
            // Keeps piped stdout limited to the transcript
            for line in self.renderer.render_pending() {
                eprintln!("{}", line.plain);
            }
        }

        let request_text = if attachments.is_empty() { text.as_str() } else { prompt };
        let result = self.client.invoke(request_text, &attachments).await;

        let (phase, reply) = {
            let message = self.conversation.get_mut(reply_id).ok_or_else(|| {
                VerionError::Inference(format!("Reply message {} disappeared", reply_id))
            })?;
            match result {
                Ok(reply) => message.resolve(reply, self.animate)?,
                Err(e) => {
                    tracing::warn!(error = %e, "inference request failed");
                    message.fail()?;
                }
            }
            (message.phase, message.text.clone())
        };

        if phase == MessagePhase::Revealing {
            reveal(
                out,
                &self.renderer,
                &mut self.revealer,
                &mut region,
                &reply,
                self.cadence,
                columns,
            )
            .await?;
            if let Some(message) = self.conversation.get_mut(reply_id) {
                message.finish_reveal()?;
            }
        } else {
            let lines = self.renderer.render_blocks(&formatter::format(&reply), false);
            region.draw(out, &lines, columns)?;
        }

        region.commit();
        writeln!(out)?;
        Ok(true)
    }
}

/// Type out `text` in `region`, re-formatting the revealed prefix on every
/// tick. Returns whether the reveal ran to completion.
pub async fn reveal<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    revealer: &mut Revealer,
    region: &mut LiveRegion,
    text: &str,
    cadence: Duration,
    columns: u16,
) -> Result<bool> {
    let (done_tx, done_rx) = oneshot::channel();
    let mut updates = revealer.start(text, cadence, move || {
        let _ = done_tx.send(());
    });

    let initial = updates.borrow_and_update().clone();
    region.draw(
        out,
        &renderer.render_blocks(&formatter::format(initial.revealed_text()), initial.is_active()),
        columns,
    )?;

    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        let lines =
            renderer.render_blocks(&formatter::format(state.revealed_text()), state.is_active());
        region.draw(out, &lines, columns)?;
        if !state.is_active() {
            break;
        }
    }

    Ok(done_rx.await.is_ok())
}
