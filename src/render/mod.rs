//! Terminal rendering for the live view.
//!
//! Rendering is split in two: [`frame::compose`] lays a stage out into spans,
//! and [`Renderer`] writes those spans with crossterm. Input decoding lives in
//! [`input`] and reads the layout of the last drawn frame.

pub mod frame;
pub mod input;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::Write;

pub use frame::{Frame, Layout, Span, Tone, compose};
pub use input::InputMapper;

/// Writes frames to a terminal, or any writer in tests.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Replace the screen contents with `frame`.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, Clear(ClearType::All))?;

        for span in &frame.spans {
            queue!(self.out, MoveTo(span.col, span.row))?;
            match span.tone {
                Tone::Plain => {}
                Tone::Caption => queue!(self.out, SetAttribute(Attribute::Bold))?,
                tone => queue!(self.out, SetForegroundColor(tone_color(tone)))?,
            }
            queue!(
                self.out,
                Print(&span.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Accent => Color::Cyan,
        Tone::Muted => Color::DarkGrey,
        Tone::Star => Color::Yellow,
        Tone::Plain | Tone::Caption => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_writes_span_text() {
        let frame = Frame {
            spans: vec![
                Span {
                    col: 2,
                    row: 1,
                    text: "Hello".to_string(),
                    tone: Tone::Caption,
                },
                Span {
                    col: 2,
                    row: 3,
                    text: "★★★".to_string(),
                    tone: Tone::Star,
                },
            ],
            layout: Layout::default(),
        };

        let mut renderer = Renderer::new(Vec::new());
        renderer.draw(&frame).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();

        // Cursor positioning is 1-based in the escape sequence
        assert!(output.contains("\x1b[2;3H"));
        assert!(output.contains("Hello"));
        assert!(output.contains("★★★"));
    }
}
