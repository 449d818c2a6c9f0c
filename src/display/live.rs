//! Redrawable output region

use std::io::{self, Write};

use termimad::crossterm::cursor::{MoveToColumn, MoveUp};
use termimad::crossterm::terminal::{Clear, ClearType};
use termimad::crossterm::QueueableCommand;

use super::render::RenderedLine;

/// The rows most recently printed at the bottom of the terminal.
///
/// Each `draw` erases what the previous one printed, so a growing reply can
/// be re-rendered in place.
#[derive(Debug, Default)]
pub struct LiveRegion {
    rows: usize,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        lines: &[RenderedLine],
        columns: u16,
    ) -> io::Result<()> {
        self.erase(out)?;
        for line in lines {
            writeln!(out, "{}", line.styled)?;
        }
        self.rows = lines.iter().map(|l| l.rows(columns)).sum();
        out.flush()
    }

    fn erase<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.rows == 0 {
            return Ok(());
        }
        let up = u16::try_from(self.rows).unwrap_or(u16::MAX);
        out.queue(MoveToColumn(0))?
            .queue(MoveUp(up))?
            .queue(Clear(ClearType::FromCursorDown))?;
        self.rows = 0;
        Ok(())
    }

    /// Forget the region so the next draw appends below it
    pub fn commit(&mut self) {
        self.rows = 0;
    }
}
