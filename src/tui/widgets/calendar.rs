//! Contribution grid widget: cells, weekday gutter and month labels

use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::calendar::grid::DAYS_PER_WEEK;
use crate::calendar::{cell_fill, CalendarGrid, InteractionState};
use crate::tui::layout::CalendarLayout;
use crate::tui::theme::{CellPaint, Theme};
use crate::types::{CalendarKind, Labels};

/// Width of the weekday label gutter
pub const LABEL_WIDTH: u16 = 5;

/// Rows used: seven weekdays plus the month label row
pub const CALENDAR_HEIGHT: u16 = DAYS_PER_WEEK as u16 + 1;

const HOVER_MARK: &str = "·";
const SELECTED_MARK: &str = "•";
const SPLIT_MARK: &str = "▌";

/// Area the cells occupy inside a calendar block
pub fn grid_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(LABEL_WIDTH),
        y: area.y,
        width: area.width.saturating_sub(LABEL_WIDTH),
        height: area.height.min(DAYS_PER_WEEK as u16),
    }
}

pub struct CalendarView<'a> {
    grid: &'a CalendarGrid,
    layout: CalendarLayout,
    kind: CalendarKind,
    interaction: InteractionState,
    theme: Theme,
    labels: &'static Labels,
}

impl<'a> CalendarView<'a> {
    pub fn new(
        grid: &'a CalendarGrid,
        layout: CalendarLayout,
        kind: CalendarKind,
        theme: Theme,
        labels: &'static Labels,
    ) -> Self {
        Self {
            grid,
            layout,
            kind,
            interaction: InteractionState::Idle,
            theme,
            labels,
        }
    }

    pub fn with_interaction(mut self, interaction: InteractionState) -> Self {
        self.interaction = interaction;
        self
    }

    fn render_weekdays(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        for (row, label) in self.labels.weekdays.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            buf.set_stringn(area.x, y, label, LABEL_WIDTH as usize - 1, style);
        }
    }

    fn render_cells(&self, buf: &mut Buffer) {
        for (pos, cell) in self.grid.cells() {
            if cell.is_padding() {
                continue;
            }
            let Some(rect) = self.layout.cell_rect(pos) else {
                continue;
            };

            let paint = self.theme.paint(cell_fill(cell.record.as_ref(), self.kind));
            for x in rect.left()..rect.right() {
                let Some(c) = buf.cell_mut(Position::new(x, rect.y)) else {
                    continue;
                };
                match paint {
                    CellPaint::Solid(color) => {
                        c.set_symbol(" ").set_bg(color);
                    }
                    CellPaint::Split { post, life } => {
                        c.set_symbol(SPLIT_MARK).set_fg(post).set_bg(life);
                    }
                }
            }

            let mark = if self.interaction.selected() == Some(pos) {
                Some(SELECTED_MARK)
            } else if self.interaction.hovered() == Some(pos) {
                Some(HOVER_MARK)
            } else {
                None
            };
            if let Some(mark) = mark {
                let x = rect.x + rect.width / 2;
                if let Some(c) = buf.cell_mut(Position::new(x, rect.y)) {
                    c.set_symbol(mark).set_style(
                        Style::default()
                            .fg(self.theme.text())
                            .add_modifier(Modifier::BOLD),
                    );
                }
            }
        }
    }

    fn render_months(&self, y: u16, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.muted());
        let right = self.layout.area().right();
        let mut previous = None;
        let mut next_free = 0u16;

        for week in 0..self.grid.week_count() {
            let Some(date) = self.grid.week_start(week) else {
                continue;
            };
            let month = date.month0() as usize;
            if previous == Some(month) {
                continue;
            }
            previous = Some(month);

            let Some(x) = self.layout.week_x(week) else {
                break;
            };
            if x < next_free {
                continue;
            }
            let label = self.labels.months[month];
            let (end, _) = buf.set_stringn(x, y, label, usize::from(right - x), style);
            next_free = end + 1;
        }
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < CALENDAR_HEIGHT || area.width <= LABEL_WIDTH {
            return;
        }
        self.render_weekdays(area, buf);
        self.render_cells(buf);
        self.render_months(area.y + DAYS_PER_WEEK as u16, buf);
    }
}
