//! .docx writer on top of `docx-rs`.
//!
//! Only headings, plain paragraphs and level-0 bullets are needed, so the
//! builder collects those blocks and renders them into a `docx_rs::Docx`
//! with Calibri 11pt defaults.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};

use super::ExportError;

/// docx-rs always emits its own numbering with id 1; bullets use the next one.
const BULLET_NUM_ID: usize = 2;

const BODY_FONT: &str = "Calibri";
/// Half-points.
const BODY_SIZE: usize = 22;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullet(String),
}

/// Accumulates blocks and serializes them into a .docx byte buffer.
#[derive(Debug, Clone, Default)]
pub struct DocxBuilder {
    blocks: Vec<Block>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels 1 and 2 map to the `Heading1`/`Heading2` styles.
    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading {
            level: level.clamp(1, 2),
            text: text.into(),
        });
        self
    }

    /// Newlines in `text` become line breaks within the paragraph.
    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .extend(items.into_iter().map(|s| Block::Bullet(s.into())));
        self
    }

    pub fn build(&self) -> Result<Vec<u8>, ExportError> {
        let mut doc = styled_document();

        for block in &self.blocks {
            let paragraph = match block {
                Block::Heading { level, text } => {
                    text_paragraph(text).style(&format!("Heading{level}"))
                }
                Block::Paragraph(text) => text_paragraph(text),
                Block::Bullet(text) => text_paragraph(text)
                    .style("ListBullet")
                    .numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(0)),
            };
            doc = doc.add_paragraph(paragraph);
        }

        let mut buf = Vec::new();
        doc.build()
            .pack(Cursor::new(&mut buf))
            .map_err(|e| ExportError::Pack(e.to_string()))?;
        Ok(buf)
    }
}

fn styled_document() -> Docx {
    let bullet = AbstractNumbering::new(BULLET_NUM_ID).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(Some(360), Some(SpecialIndentType::Hanging(360)), None, None),
    );

    Docx::new()
        .default_fonts(
            RunFonts::new()
                .ascii(BODY_FONT)
                .hi_ansi(BODY_FONT)
                .east_asia(BODY_FONT)
                .cs(BODY_FONT),
        )
        .default_size(BODY_SIZE)
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .bold()
                .size(28),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .bold()
                .size(26),
        )
        .add_style(Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(bullet)
        .add_numbering(Numbering::new(BULLET_NUM_ID, BULLET_NUM_ID))
}

/// One run; newlines become text-wrapping breaks and tabs become tab stops.
/// An empty string yields a paragraph with no run.
fn text_paragraph(text: &str) -> Paragraph {
    let paragraph = Paragraph::new();
    if text.is_empty() {
        return paragraph;
    }

    let normalized = xml_safe(&text.replace("\r\n", "\n").replace('\r', "\n"));
    let mut run = Run::new();
    let mut segment = String::new();
    for ch in normalized.chars() {
        match ch {
            '\n' | '\t' => {
                if !segment.is_empty() {
                    run = run.add_text(std::mem::take(&mut segment));
                }
                run = if ch == '\n' {
                    run.add_break(BreakType::TextWrapping)
                } else {
                    run.add_tab()
                };
            }
            _ => segment.push(ch),
        }
    }
    if !segment.is_empty() {
        run = run.add_text(segment);
    }
    paragraph.add_run(run)
}

/// Drops characters outside the XML 1.0 `Char` production
/// (PDF text often carries form feeds and other C0 controls).
/// docx-rs escapes markup characters but passes these through.
pub fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || ('\u{20}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || c >= '\u{10000}'
        })
        .collect()
}
