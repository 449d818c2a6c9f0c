//! Block rendering using termimad styles

use termimad::crossterm::style::{Attribute, Color};
use termimad::{gray, CompoundStyle, MadSkin};
use unicode_width::UnicodeWidthStr;

use crate::formatter::{Block, InlineSpan};
use crate::models::{Message, Role};

/// Shown in place of a pending reply
pub const ANALYZING_TEXT: &str = "Verion is analyzing...";

/// One terminal line, with and without escape codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub styled: String,
    pub plain: String,
}

impl RenderedLine {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            styled: text.clone(),
            plain: text,
        }
    }

    /// Terminal rows this line occupies once wrapped at `columns`
    pub fn rows(&self, columns: u16) -> usize {
        let columns = usize::from(columns.max(1));
        self.plain.width().div_ceil(columns).max(1)
    }
}

/// Renders formatter output and message chrome for the terminal
pub struct Renderer {
    styled: bool,
    skin: MadSkin,
    marker: CompoundStyle,
    muted: CompoundStyle,
    caret: String,
}

impl Renderer {
    pub fn new(styled: bool, caret: impl Into<String>) -> Self {
        let mut skin = MadSkin::default();
        customize_skin(&mut skin);

        let mut muted = CompoundStyle::with_fg(gray(12));
        muted.add_attr(Attribute::Italic);

        Self {
            styled,
            skin,
            marker: CompoundStyle::with_fg(Color::Cyan),
            muted,
            caret: caret.into(),
        }
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Render blocks, appending the caret to the last line when `caret` is set
    pub fn render_blocks(&self, blocks: &[Block], caret: bool) -> Vec<RenderedLine> {
        let mut lines: Vec<RenderedLine> = blocks.iter().map(|b| self.render_block(b)).collect();

        if caret {
            let caret_line = self.line(&self.skin.paragraph.compound_style, &self.caret);
            match lines.last_mut() {
                Some(last) => {
                    last.styled.push_str(&caret_line.styled);
                    last.plain.push_str(&caret_line.plain);
                }
                None => lines.push(caret_line),
            }
        }

        lines
    }

    fn render_block(&self, block: &Block) -> RenderedLine {
        match block {
            Block::Heading { level, .. } => {
                let index = usize::from(level.saturating_sub(1)).min(self.skin.headers.len() - 1);
                self.spans_line(&self.skin.headers[index].compound_style, &block.spans())
            }
            Block::BulletItem(_) => self.prefixed("  • ".to_string(), &block.spans()),
            Block::NumberedItem { ordinal, .. } => {
                self.prefixed(format!("  {}. ", ordinal), &block.spans())
            }
            Block::BoldParagraph(_) => self.spans_line(&self.skin.bold, &block.spans()),
            Block::Paragraph(_) => {
                self.spans_line(&self.skin.paragraph.compound_style, &block.spans())
            }
            Block::Spacer => RenderedLine::plain(""),
        }
    }

    fn prefixed(&self, marker: String, spans: &[InlineSpan]) -> RenderedLine {
        let mut line = self.line(&self.marker, &marker);
        let body = self.spans_line(&self.skin.paragraph.compound_style, spans);
        line.styled.push_str(&body.styled);
        line.plain.push_str(&body.plain);
        line
    }

    fn spans_line(&self, base: &CompoundStyle, spans: &[InlineSpan]) -> RenderedLine {
        let mut line = RenderedLine::plain("");
        for span in spans {
            let part = match span {
                InlineSpan::Plain(text) => self.line(base, text),
                InlineSpan::Bold(text) => {
                    let mut bold = base.clone();
                    bold.add_attr(Attribute::Bold);
                    self.line(&bold, text)
                }
            };
            line.styled.push_str(&part.styled);
            line.plain.push_str(&part.plain);
        }
        line
    }

    fn line(&self, style: &CompoundStyle, text: &str) -> RenderedLine {
        if self.styled && !text.is_empty() {
            RenderedLine {
                styled: style.apply_to(text).to_string(),
                plain: text.to_string(),
            }
        } else {
            RenderedLine::plain(text)
        }
    }

    /// `Verion · 14:05` / `You · 14:05`, plus the attachment label if any
    pub fn render_header(&self, message: &Message) -> Vec<RenderedLine> {
        let author = match message.role {
            Role::User => "You",
            Role::Assistant => "Verion",
        };
        let style = match message.role {
            Role::User => &self.skin.headers[1].compound_style,
            Role::Assistant => &self.skin.headers[0].compound_style,
        };

        let mut header = self.line(style, author);
        let time = self.line(&self.muted, &format!(" · {}", message.timestamp()));
        header.styled.push_str(&time.styled);
        header.plain.push_str(&time.plain);

        let mut lines = vec![header];
        if let Some(info) = &message.attachment {
            lines.push(self.line(&self.muted, &format!("[file] {}", info.label())));
        }
        lines
    }

    /// Waiting affordance for a pending reply
    pub fn render_pending(&self) -> Vec<RenderedLine> {
        vec![self.line(&self.muted, ANALYZING_TEXT)]
    }

    /// Static rendering of a whole message. User text is shown verbatim,
    /// assistant text goes through the formatter.
    pub fn render_message(&self, message: &Message) -> Vec<RenderedLine> {
        let mut lines = self.render_header(message);
        if message.is_pending() {
            lines.extend(self.render_pending());
        } else {
            match message.role {
                Role::User => lines.extend(message.text.lines().map(RenderedLine::plain)),
                Role::Assistant => lines.extend(
                    self.render_blocks(&crate::formatter::format(&message.text), false),
                ),
            }
        }
        lines
    }
}

/// Customize termimad skin for assistant replies
fn customize_skin(skin: &mut MadSkin) {
    use termimad::crossterm::style::Color::*;

    skin.headers[0].set_fg(Cyan);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Blue);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(Blue);

    skin.bold.add_attr(Attribute::Bold);
    skin.bold.set_fg(White);
}
