//! Loading spinner widget

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Inline spinner shown while a calendar fetch is in flight
pub struct Spinner<'a> {
    frame: usize,
    label: &'a str,
    style: Style,
}

impl<'a> Spinner<'a> {
    pub fn new(frame: usize, label: &'a str) -> Self {
        Self {
            frame,
            label,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let text = format!("{} {}", self.current_char(), self.label);
        buf.set_stringn(area.x, area.y, &text, area.width as usize, self.style);
    }
}
