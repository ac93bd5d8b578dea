//! Frame composition for the live view.
//!
//! [`compose`] turns a stage snapshot into positioned text spans plus a
//! [`Layout`] describing where the interactive regions landed. Nothing here
//! touches the terminal, so frames can be inspected directly in tests.

use std::time::Duration;

use crate::common::constants::MAXIMUM_RATING;
use crate::common::utils::{char_len, char_prefix, progress_bar, wrap_text};
use crate::stage::Stage;

const MARGIN: u16 = 2;
const CARD_TOP: u16 = 3;
const MAX_CARD_WIDTH: u16 = 64;
const MIN_CARD_WIDTH: u16 = 20;
const LOADING_BAR_WIDTH: usize = 32;

/// Visual role of a span; the renderer maps tones to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Caption,
    Accent,
    Muted,
    Star,
}

/// A run of text at a fixed terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub tone: Tone,
}

/// Rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.left
            && row >= self.top
            && col < self.left.saturating_add(self.width)
            && row < self.top.saturating_add(self.height)
    }
}

/// Interactive regions of the last composed frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// The review card, including its border. `None` while loading.
    pub card: Option<Rect>,
    /// Pagination dots as `(col, row)`, one per review in order.
    pub dots: Vec<(u16, u16)>,
}

impl Layout {
    pub fn card_contains(&self, col: u16, row: u16) -> bool {
        self.card.is_some_and(|card| card.contains(col, row))
    }

    /// Index of the dot under `(col, row)`, if any.
    pub fn dot_at(&self, col: u16, row: u16) -> Option<usize> {
        self.dots
            .iter()
            .position(|&(dot_col, dot_row)| dot_col == col && dot_row == row)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub spans: Vec<Span>,
    pub layout: Layout,
}

impl Frame {
    /// Plain text of every span on `row`, in column order.
    pub fn row_text(&self, row: u16) -> String {
        let mut spans: Vec<&Span> = self.spans.iter().filter(|s| s.row == row).collect();
        spans.sort_by_key(|s| s.col);
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn push(&mut self, col: u16, row: u16, text: impl Into<String>, tone: Tone) {
        self.spans.push(Span {
            col,
            row,
            text: text.into(),
            tone,
        });
    }
}

/// Compose the frame for `stage` at `now` on a `width` x `height` terminal.
pub fn compose(stage: &Stage, now: Duration, width: u16, height: u16) -> Frame {
    let mut frame = Frame::default();
    if width == 0 || height == 0 {
        return frame;
    }

    if stage.intro().is_loading() {
        compose_loading(&mut frame, stage, now, width, height);
        return frame;
    }

    // Caption with a block cursor
    let caption = stage.caption().current_text();
    let room = usize::from(width.saturating_sub(MARGIN + 1));
    let shown = tail_chars(caption, room);
    frame.push(MARGIN, 1, shown, Tone::Caption);
    frame.push(
        MARGIN + u16::try_from(char_len(shown)).unwrap_or(u16::MAX),
        1,
        "▌",
        Tone::Accent,
    );

    let next_row = compose_reviews(&mut frame, stage, width);
    let help_row = height.saturating_sub(1);
    compose_projects(&mut frame, stage, width, next_row + 1, help_row);

    if help_row > next_row {
        frame.push(
            MARGIN,
            help_row,
            fit(
                "←/→ reviews  1-9 jump  space pause  f filter  q quit",
                width,
                MARGIN,
            ),
            Tone::Muted,
        );
    }

    frame
}

fn compose_loading(frame: &mut Frame, stage: &Stage, now: Duration, width: u16, height: u16) {
    let row = height / 2;
    let bar_width = LOADING_BAR_WIDTH.min(usize::from(width.saturating_sub(2 * MARGIN)));
    let col = width.saturating_sub(u16::try_from(bar_width).unwrap_or(width)) / 2;

    frame.push(col, row.saturating_sub(1), fit("Loading", width, col), Tone::Muted);
    frame.push(
        col,
        row,
        progress_bar(stage.intro().progress(now), bar_width),
        Tone::Accent,
    );
}

/// Draw the review card and its dots. Returns the first free row below them.
fn compose_reviews(frame: &mut Frame, stage: &Stage, width: u16) -> u16 {
    let carousel = stage.reviews();
    let review = carousel.active_review();

    let card_width = width
        .saturating_sub(2 * MARGIN)
        .clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
    let inner = usize::from(card_width - 4);

    let mut body: Vec<(String, Tone)> = Vec::new();
    let stars = usize::from(review.rating.min(MAXIMUM_RATING));
    body.push((
        format!(
            "{}{}",
            "★".repeat(stars),
            "☆".repeat(usize::from(MAXIMUM_RATING) - stars)
        ),
        Tone::Star,
    ));
    for line in wrap_text(&format!("\u{201c}{}\u{201d}", review.quote), inner) {
        body.push((line, Tone::Plain));
    }
    body.push((format!("- {}", review.author), Tone::Accent));

    let mut row = CARD_TOP;
    let horizontal = "─".repeat(usize::from(card_width - 2));
    frame.push(MARGIN, row, format!("┌{horizontal}┐"), Tone::Muted);
    for (text, tone) in &body {
        row += 1;
        let text = char_prefix(text, inner);
        let pad = inner - char_len(text);
        frame.push(MARGIN, row, "│ ", Tone::Muted);
        frame.push(MARGIN + 2, row, text, *tone);
        frame.push(
            MARGIN + 2 + u16::try_from(char_len(text)).unwrap_or(0),
            row,
            format!("{} │", " ".repeat(pad)),
            Tone::Muted,
        );
    }
    row += 1;
    frame.push(MARGIN, row, format!("└{horizontal}┘"), Tone::Muted);

    frame.layout.card = Some(Rect {
        left: MARGIN,
        top: CARD_TOP,
        width: card_width,
        height: row - CARD_TOP + 1,
    });

    // Dots sit two cells apart under the card
    row += 1;
    let mut col = MARGIN + 1;
    for index in 0..carousel.reviews().len() {
        if col >= width {
            break;
        }
        let (glyph, tone) = if index == carousel.active_index() {
            ("●", Tone::Accent)
        } else {
            ("○", Tone::Muted)
        };
        frame.push(col, row, glyph, tone);
        frame.layout.dots.push((col, row));
        col = col.saturating_add(2);
    }
    let label_col = col.saturating_add(1);
    if carousel.is_paused() && label_col < width {
        frame.push(label_col, row, fit("paused", width, label_col), Tone::Muted);
    }

    row + 1
}

fn compose_projects(frame: &mut Frame, stage: &Stage, width: u16, top: u16, limit: u16) {
    let shelf = stage.shelf();
    if shelf.projects().is_empty() || top >= limit {
        return;
    }

    let mut row = top;
    frame.push(
        MARGIN,
        row,
        fit(&format!("Projects  [{}]", shelf.filter()), width, MARGIN),
        Tone::Caption,
    );

    for project in shelf.visible() {
        if row + 2 >= limit {
            break;
        }
        row += 1;
        let tech = if project.tech_stack.is_empty() {
            String::new()
        } else {
            format!("  ({})", project.tech_stack.join(", "))
        };
        frame.push(
            MARGIN,
            row,
            fit(&format!("• {}{tech}", project.title), width, MARGIN),
            Tone::Plain,
        );
        row += 1;
        frame.push(
            MARGIN + 2,
            row,
            fit(
                &format!(
                    "live: {}  code: {}",
                    project.live_link(),
                    project.github_link()
                ),
                width,
                MARGIN + 2,
            ),
            Tone::Muted,
        );
    }
}

/// Truncate `text` so it fits between `col` and the right edge.
fn fit(text: &str, width: u16, col: u16) -> String {
    char_prefix(text, usize::from(width.saturating_sub(col))).to_string()
}

/// The last `chars` characters of `text`, so a long caption keeps its cursor end visible.
fn tail_chars(text: &str, chars: usize) -> &str {
    let len = char_len(text);
    if len <= chars {
        return text;
    }
    let skip = char_prefix(text, len - chars).len();
    &text[skip..]
}
