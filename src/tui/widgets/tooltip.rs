//! Hover tooltip: date plus per-category counts

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::calendar::positioner::TOOLTIP_WIDTH;
use crate::calendar::{GridCell, Size};
use crate::tui::layout::ROW_UNITS;
use crate::tui::theme::Theme;
use crate::types::{date_key, CalendarKind, Category, Labels};

/// Border plus the date and up to two count lines
const TOOLTIP_ROWS: u16 = 5;

/// Tooltip size in layout units
pub const TOOLTIP_SIZE: Size = Size {
    width: TOOLTIP_WIDTH,
    height: TOOLTIP_ROWS as f64 * ROW_UNITS,
};

/// Count lines shown under the date. Empty days show none.
pub fn count_lines(cell: &GridCell, kind: CalendarKind, labels: &Labels) -> Vec<String> {
    let Some(record) = cell.record.as_ref().filter(|r| r.has_activity()) else {
        return Vec::new();
    };
    match kind {
        CalendarKind::Post => vec![format!("{}: {}", labels.posts, record.count)],
        CalendarKind::Life => vec![format!("{}: {}", labels.life_records, record.count)],
        CalendarKind::All => {
            let posts = record.items(Category::Post).len();
            let life = record.items(Category::Life).len();
            if posts + life == 0 {
                return vec![format!("{} {}", record.count, labels.records)];
            }
            let mut lines = Vec::with_capacity(2);
            if posts > 0 {
                lines.push(format!("{}: {}", labels.posts, posts));
            }
            if life > 0 {
                lines.push(format!("{}: {}", labels.life_records, life));
            }
            lines
        }
    }
}

pub struct Tooltip<'a> {
    cell: &'a GridCell,
    kind: CalendarKind,
    theme: Theme,
    labels: &'static Labels,
}

impl<'a> Tooltip<'a> {
    pub fn new(cell: &'a GridCell, kind: CalendarKind, theme: Theme, labels: &'static Labels) -> Self {
        Self {
            cell,
            kind,
            theme,
            labels,
        }
    }
}

impl Widget for Tooltip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(date) = self.cell.date else {
            return;
        };
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::styled(
            date_key(date),
            Style::default().fg(self.theme.date()),
        )];
        lines.extend(
            count_lines(self.cell, self.kind, self.labels)
                .into_iter()
                .map(|text| Line::styled(text, Style::default().fg(self.theme.text()))),
        );
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayRecord, Locale};
    use chrono::NaiveDate;

    fn cell(json: &str) -> GridCell {
        let record: DayRecord = serde_json::from_str(json).unwrap();
        GridCell {
            date: record.parsed_date(),
            record: Some(record),
        }
    }

    #[test]
    fn test_empty_day_has_no_counts() {
        let empty = GridCell {
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            record: None,
        };
        assert!(count_lines(&empty, CalendarKind::All, Locale::En.labels()).is_empty());
    }

    #[test]
    fn test_single_kind_uses_total() {
        let c = cell(r#"{"date": "2024-03-01", "type": "life", "count": 3}"#);
        assert_eq!(
            count_lines(&c, CalendarKind::Life, Locale::En.labels()),
            vec!["Life records: 3"]
        );
    }

    #[test]
    fn test_all_view_splits_by_category() {
        let c = cell(
            r#"{"date": "2024-03-01", "type": "both", "count": 3,
                "posts": [{"id": 1, "title": "a", "content": "", "type": "post"}],
                "life_records": [
                    {"id": 2, "title": "b", "content": "", "type": "life"},
                    {"id": 3, "title": "c", "content": "", "type": "life"}
                ]}"#,
        );
        assert_eq!(
            count_lines(&c, CalendarKind::All, Locale::En.labels()),
            vec!["Posts: 1", "Life records: 2"]
        );
    }

    #[test]
    fn test_all_view_without_items_falls_back_to_total() {
        let c = cell(r#"{"date": "2024-03-01", "type": "post", "count": 4}"#);
        assert_eq!(
            count_lines(&c, CalendarKind::All, Locale::Zh.labels()),
            vec!["4 条记录"]
        );
    }

    #[test]
    fn test_tooltip_size_in_units() {
        assert_eq!(TOOLTIP_SIZE.width, 140.0);
        assert_eq!(TOOLTIP_SIZE.height, 80.0);
    }
}
