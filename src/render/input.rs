//! Terminal events to stage controls.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::frame::Layout;
use crate::stage::Control;

/// Decodes crossterm events against the last drawn layout.
///
/// Hover is tracked here so pointer motion inside the card produces a single
/// `Hover(true)` on entry and a single `Hover(false)` on exit.
#[derive(Debug, Default)]
pub struct InputMapper {
    hovering: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_event(&mut self, event: &Event, layout: &Layout) -> Option<Control> {
        match event {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse, layout),
            // The pointer cannot be over the card once the terminal loses focus
            Event::FocusLost => self.set_hover(false),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent, layout: &Layout) -> Option<Control> {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.set_hover(layout.card_contains(mouse.column, mouse.row))
            }
            MouseEventKind::Down(MouseButton::Left) => layout
                .dot_at(mouse.column, mouse.row)
                .map(Control::GoTo),
            _ => None,
        }
    }

    fn set_hover(&mut self, inside: bool) -> Option<Control> {
        if self.hovering == inside {
            return None;
        }
        self.hovering = inside;
        Some(Control::Hover(inside))
    }
}

fn map_key(key: &KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Control::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Control::Prev),
        KeyCode::Right | KeyCode::Char('l') => Some(Control::Next),
        KeyCode::Char(digit @ '1'..='9') => {
            Some(Control::GoTo(digit as usize - '1' as usize))
        }
        KeyCode::Char(' ') => Some(Control::TogglePause),
        KeyCode::Char('f') => Some(Control::CycleFilter),
        KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
        _ => None,
    }
}
