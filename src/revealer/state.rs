use std::sync::Arc;

/// Outcome of a single reveal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One more character became visible
    Advanced,
    /// The final character became visible on this step
    Completed,
    /// Nothing left to reveal
    Idle,
}

/// Progress of revealing one piece of text.
///
/// `revealed_text()` is always a prefix of `full_text()` ending on a char
/// boundary. `is_active()` holds from creation (for non-empty text) until
/// the step that reveals the last character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    full_text: Arc<str>,
    revealed: usize,
    active: bool,
}

impl RevealState {
    pub fn new(full_text: impl Into<Arc<str>>) -> Self {
        let full_text = full_text.into();
        let active = !full_text.is_empty();
        Self {
            full_text,
            revealed: 0,
            active,
        }
    }

    #[cfg(test)]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn revealed_text(&self) -> &str {
        &self.full_text[..self.revealed]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.full_text.len()
    }

    /// Reveal exactly one more character
    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Idle;
        }

        if let Some(next) = self.full_text[self.revealed..].chars().next() {
            self.revealed += next.len_utf8();
        }

        if self.is_complete() {
            self.active = false;
            Tick::Completed
        } else {
            Tick::Advanced
        }
    }
}
