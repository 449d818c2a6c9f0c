//! Terminal display module
//!
//! Renders formatted replies with automatic TTY detection and redraws the
//! reply region in place while it is being revealed.

mod live;
mod render;
mod terminal;

pub use live::LiveRegion;
pub use render::{RenderedLine, Renderer};
pub use terminal::{columns, should_use_colors};

use std::io::{self, Write};

/// Print lines once, without any redraw bookkeeping
pub fn print_lines<W: Write>(out: &mut W, lines: &[RenderedLine]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line.styled)?;
    }
    out.flush()
}
