//! Day detail popover listing a selected day's items

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};

use crate::calendar::resolve_url;
use crate::tui::theme::Theme;
use crate::types::{date_key, CalendarKind, Category, DayRecord, Labels, Locale};

/// One line of popover content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverRow {
    Summary(String),
    Header(&'static str),
    Item { label: String, url: Option<String> },
    /// Items that did not fit
    More(usize),
}

/// What a press inside the popover hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverHit {
    Close,
    /// An item with a destination
    Item(String),
    Inside,
}

pub struct Popover {
    area: Rect,
    title: String,
    close_label: String,
    rows: Vec<PopoverRow>,
    theme: Theme,
}

impl Popover {
    pub fn new(
        area: Rect,
        date: NaiveDate,
        record: &DayRecord,
        kind: CalendarKind,
        locale: Locale,
        theme: Theme,
    ) -> Self {
        let labels = locale.labels();
        let mut rows = build_rows(record, kind, locale, labels);
        fit_rows(&mut rows, inner(area).height as usize);
        Self {
            area,
            title: format!(" {} ", date_key(date)),
            close_label: format!("[{}]", labels.close),
            rows,
            theme,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn rows(&self) -> &[PopoverRow] {
        &self.rows
    }

    /// Close button on the top border, right-aligned
    pub fn close_area(&self) -> Rect {
        let width = Span::raw(self.close_label.as_str()).width() as u16;
        if self.area.width < width + 2 {
            return Rect::new(self.area.x, self.area.y, 0, 0);
        }
        Rect::new(self.area.right() - width - 1, self.area.y, width, 1)
    }

    pub fn hit(&self, position: Position) -> Option<PopoverHit> {
        if !self.area.contains(position) {
            return None;
        }
        if self.close_area().contains(position) {
            return Some(PopoverHit::Close);
        }
        let inner = inner(self.area);
        if inner.contains(position) {
            let index = usize::from(position.y - inner.y);
            if let Some(PopoverRow::Item { url: Some(url), .. }) = self.rows.get(index) {
                return Some(PopoverHit::Item(url.clone()));
            }
        }
        Some(PopoverHit::Inside)
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn build_rows(
    record: &DayRecord,
    kind: CalendarKind,
    locale: Locale,
    labels: &'static Labels,
) -> Vec<PopoverRow> {
    let mut rows = vec![PopoverRow::Summary(format!(
        "{} {}",
        record.count, labels.records
    ))];
    for (category, header) in [
        (Category::Post, labels.posts),
        (Category::Life, labels.life_records),
    ] {
        let items = record.items(category);
        if !kind.includes(category) || items.is_empty() {
            continue;
        }
        // Single-category views need no section headers
        if kind == CalendarKind::All {
            rows.push(PopoverRow::Header(header));
        }
        rows.extend(items.iter().map(|item| PopoverRow::Item {
            label: item.label(),
            url: resolve_url(item, locale),
        }));
    }
    rows
}

/// Trim to `height` lines, replacing the overflow with a "+N" row
fn fit_rows(rows: &mut Vec<PopoverRow>, height: usize) {
    if rows.len() <= height {
        return;
    }
    if height == 0 {
        rows.clear();
        return;
    }
    let hidden = rows[height - 1..]
        .iter()
        .filter(|row| matches!(row, PopoverRow::Item { .. }))
        .count();
    rows.truncate(height - 1);
    rows.push(PopoverRow::More(hidden));
}

impl Widget for &Popover {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                self.title.as_str(),
                Style::default()
                    .fg(self.theme.date())
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Left)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let close = self.close_area();
        if close.width > 0 {
            buf.set_string(
                close.x,
                close.y,
                &self.close_label,
                Style::default().fg(self.theme.accent()),
            );
        }

        let width = inner.width as usize;
        for (row, y) in self.rows.iter().zip(inner.top()..inner.bottom()) {
            let (text, style) = match row {
                PopoverRow::Summary(text) => (text.clone(), Style::default().fg(self.theme.text())),
                PopoverRow::Header(header) => (
                    header.to_string(),
                    Style::default()
                        .fg(self.theme.date())
                        .add_modifier(Modifier::BOLD),
                ),
                PopoverRow::Item { label, url } => {
                    let color = if url.is_some() {
                        self.theme.text()
                    } else {
                        self.theme.muted()
                    };
                    (format!("• {}", label), Style::default().fg(color))
                }
                PopoverRow::More(hidden) => {
                    (format!("+{}", hidden), Style::default().fg(self.theme.muted()))
                }
            };
            buf.set_stringn(inner.x, y, text, width, style);
        }
    }
}
