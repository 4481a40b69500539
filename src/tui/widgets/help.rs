//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 17;

const CALENDAR_KEYS: &[(&str, &str)] = &[
    ("Left / Right", "Previous / next year"),
    ("p / l / a", "Posts / life / all"),
    ("t", "Toggle last 365 days"),
    ("Mouse", "Hover or click a day"),
];

const GENERAL_KEYS: &[(&str, &str)] = &[
    ("Esc", "Close day details"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_section(
        &self,
        areas: &[Rect],
        buf: &mut Buffer,
        title: &str,
        keys: &[(&str, &str)],
    ) {
        let [header, sep, rows @ ..] = areas else {
            return;
        };
        let header_line = Line::from(vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        )]);
        Paragraph::new(header_line)
            .alignment(Alignment::Left)
            .render(*header, buf);

        let line = "─".repeat(sep.width as usize);
        buf.set_string(sep.x, sep.y, &line, Style::default().fg(self.theme.muted()));

        for (area, (key, desc)) in rows.iter().zip(keys) {
            render_keybinding(*area, buf, key, desc, self.theme);
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" contribcal v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let calendar_rows = 2 + CALENDAR_KEYS.len();
        let general_rows = 2 + GENERAL_KEYS.len();
        let mut constraints = vec![Constraint::Length(1)]; // padding
        constraints.extend(std::iter::repeat(Constraint::Length(1)).take(calendar_rows));
        constraints.push(Constraint::Length(1)); // padding
        constraints.extend(std::iter::repeat(Constraint::Length(1)).take(general_rows));
        constraints.push(Constraint::Length(1)); // padding
        constraints.push(Constraint::Length(1)); // close hint
        constraints.push(Constraint::Min(0));
        let chunks = Layout::vertical(constraints).split(inner);

        let calendar_start = 1;
        let general_start = calendar_start + calendar_rows + 1;
        self.render_section(
            &chunks[calendar_start..calendar_start + calendar_rows],
            buf,
            "Calendar",
            CALENDAR_KEYS,
        );
        self.render_section(
            &chunks[general_start..general_start + general_rows],
            buf,
            "General",
            GENERAL_KEYS,
        );

        // Close hint
        let hint = Line::from(vec![Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[general_start + general_rows + 1], buf);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<16}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, POPUP_WIDTH);
        assert_eq!(popup_area.height, POPUP_HEIGHT);
        assert_eq!(popup_area.x, (100 - POPUP_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - POPUP_HEIGHT) / 2);
    }

    #[test]
    fn test_help_popup_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }

    #[test]
    fn test_help_fits_all_bindings() {
        // border + padding + sections + padding + hint
        let needed = 2 + 1 + (2 + CALENDAR_KEYS.len()) + 1 + (2 + GENERAL_KEYS.len()) + 1 + 1;
        assert!(needed as u16 <= POPUP_HEIGHT);
    }

    #[test]
    fn test_render_lists_keys() {
        let area = Rect::new(0, 0, POPUP_WIDTH, POPUP_HEIGHT);
        let mut buf = Buffer::empty(area);
        HelpPopup::default().render(area, &mut buf);

        // Row 2: "Calendar" header inside border + padding row
        assert_eq!(buf[(1, 2)].symbol(), "C");
        assert_eq!(buf[(3, 4)].symbol(), "L");
    }
}
