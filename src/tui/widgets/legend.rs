//! Intensity legend: "Less ▢▢▢▢▢ More" plus channel swatches

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::calendar::intensity::MAX_BUCKET;
use crate::calendar::{opacity, Channel};
use crate::tui::theme::Theme;
use crate::types::{CalendarKind, Labels};

const SWATCH: &str = "  ";

pub struct Legend {
    kind: CalendarKind,
    theme: Theme,
    labels: &'static Labels,
}

impl Legend {
    pub fn new(kind: CalendarKind, theme: Theme, labels: &'static Labels) -> Self {
        Self {
            kind,
            theme,
            labels,
        }
    }

    /// Swatch colors for buckets 0..=4 in the view's ramp channel
    pub fn ramp(&self) -> Vec<Color> {
        let channel = match self.kind {
            CalendarKind::Life => Channel::Life,
            CalendarKind::Post | CalendarKind::All => Channel::Post,
        };
        (0..=MAX_BUCKET)
            .map(|b| match b {
                0 => self.theme.cell_background(),
                _ => self.theme.channel_at(channel, opacity(b)),
            })
            .collect()
    }

    fn channels(&self) -> Vec<(Channel, &'static str)> {
        let mut channels = Vec::with_capacity(2);
        if self.kind != CalendarKind::Life {
            channels.push((Channel::Post, self.labels.posts));
        }
        if self.kind != CalendarKind::Post {
            channels.push((Channel::Life, self.labels.life_records));
        }
        channels
    }
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(self.theme.muted());

        let mut spans = vec![Span::styled(format!("{} ", self.labels.less), muted)];
        for color in self.ramp() {
            spans.push(Span::styled(SWATCH, Style::default().bg(color)));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(self.labels.more, muted));

        for (channel, label) in self.channels() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                SWATCH,
                Style::default().bg(self.theme.channel(channel)),
            ));
            spans.push(Span::styled(format!(" {}", label), muted));
        }

        Line::from(spans).render(area, buf);
    }
}
