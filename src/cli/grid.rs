//! `contribcal grid` subcommand: print a calendar without the TUI

use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;

use contribcal::calendar::{build_grid, cell_fill, CalendarGrid, CellFill, Channel, GridSpan};
use contribcal::config::Config;
use contribcal::services::{fetch_span, HttpDayRecordStore};
use contribcal::types::{CalendarError, CalendarKind, Result};

/// Shared calendar selection flags
#[derive(Args, Debug, Clone, Default)]
pub struct CalendarArgs {
    /// Activity to show (defaults to the configured kind)
    #[arg(long, value_enum)]
    pub kind: Option<CalendarKind>,

    /// Calendar year (defaults to the current year)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub year: Option<i32>,

    /// Show the last 365 days instead of a calendar year
    #[arg(long, conflicts_with = "year")]
    pub trailing: bool,
}

impl CalendarArgs {
    pub fn kind(&self, config: &Config) -> CalendarKind {
        self.kind.unwrap_or(config.kind)
    }

    pub fn span(&self, today: NaiveDate) -> GridSpan {
        if self.trailing {
            GridSpan::Trailing { end: today }
        } else {
            GridSpan::Year(self.year.unwrap_or_else(|| today.year()))
        }
    }
}

/// Print the grid for one kind/year
#[derive(Args, Debug)]
pub struct GridArgs {
    #[command(flatten)]
    pub calendar: CalendarArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GridArgs {
    pub fn run(self, config: &Config, today: NaiveDate) -> Result<()> {
        let kind = self.calendar.kind(config);
        let span = self.calendar.span(today);
        let store = HttpDayRecordStore::new(&config.api_url, config.request_timeout())?;
        let grid = build_grid(&fetch_span(&store, kind, span), span);

        if self.json {
            let report = GridReport::new(&grid, kind);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CalendarError::Parse(e.to_string()))?;
            println!("{}", json);
        } else {
            print!("{}", render_text(&grid, kind));
        }
        Ok(())
    }
}

/// JSON dump of a grid
#[derive(Debug, Serialize)]
pub struct GridReport {
    pub kind: CalendarKind,
    pub span: GridSpan,
    pub week_count: usize,
    pub active_days: usize,
    pub total: u64,
    pub weeks: Vec<Vec<ReportCell>>,
}

#[derive(Debug, Serialize)]
pub struct ReportCell {
    pub date: Option<NaiveDate>,
    pub count: u32,
    #[serde(flatten)]
    pub fill: CellFill,
}

impl GridReport {
    pub fn new(grid: &CalendarGrid, kind: CalendarKind) -> Self {
        let weeks: Vec<Vec<ReportCell>> = grid
            .weeks()
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| ReportCell {
                        date: cell.date,
                        count: cell.count(),
                        fill: cell_fill(cell.record.as_ref(), kind),
                    })
                    .collect()
            })
            .collect();

        Self {
            kind,
            span: grid.span(),
            week_count: grid.week_count(),
            active_days: grid.cells().filter(|(_, c)| c.has_activity()).count(),
            total: grid.cells().map(|(_, c)| u64::from(c.count())).sum(),
            weeks,
        }
    }
}

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One character per cell: ' ' padding, '·' no activity, bucket glyphs otherwise.
/// In the combined view, days with both kinds use '◆'.
pub fn render_text(grid: &CalendarGrid, kind: CalendarKind) -> String {
    let mut out = format!("{} · {}\n", kind.as_str(), grid.span().label());
    for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
        out.push_str(label);
        out.push(' ');
        for week in grid.weeks() {
            let cell = &week[weekday];
            let glyph = if cell.is_padding() {
                ' '
            } else {
                glyph(cell_fill(cell.record.as_ref(), kind))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn glyph(fill: CellFill) -> char {
    match fill {
        CellFill::Background => '·',
        CellFill::Blend { .. } => '◆',
        CellFill::Solid {
            channel: Channel::Post | Channel::Life,
            bucket,
            ..
        } => match bucket {
            1 => '░',
            2 => '▒',
            3 => '▓',
            _ => '█',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contribcal::types::DayRecord;

    fn records() -> Vec<DayRecord> {
        serde_json::from_str(
            r#"[
                {"date": "2024-01-01", "type": "post", "count": 1},
                {"date": "2024-01-02", "type": "both", "count": 5}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_span_defaults_to_current_year() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(CalendarArgs::default().span(today), GridSpan::Year(2025));

        let trailing = CalendarArgs {
            trailing: true,
            ..CalendarArgs::default()
        };
        assert_eq!(trailing.span(today), GridSpan::Trailing { end: today });
    }

    #[test]
    fn test_kind_falls_back_to_config() {
        let config = Config {
            kind: CalendarKind::Life,
            ..Config::default()
        };
        assert_eq!(CalendarArgs::default().kind(&config), CalendarKind::Life);
    }

    #[test]
    fn test_render_text_rows() {
        let grid = build_grid(&records(), GridSpan::Year(2024));
        let text = render_text(&grid, CalendarKind::All);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "all · 2024");
        assert_eq!(lines.len(), 8);
        // 2024-01-01 is a Monday, 2024-01-02 a Tuesday
        assert!(lines[1].starts_with("Mon ░"));
        assert!(lines[2].starts_with("Tue ◆"));
        assert!(lines[3].starts_with("Wed ·"));
    }

    #[test]
    fn test_grid_report_totals() {
        let grid = build_grid(&records(), GridSpan::Year(2024));
        let report = GridReport::new(&grid, CalendarKind::Post);
        assert_eq!(report.active_days, 2);
        assert_eq!(report.total, 6);
        assert_eq!(report.week_count, grid.week_count());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weeks"][0][1]["fill"], "solid");
        assert_eq!(json["weeks"][0][1]["bucket"], 4);
    }
}
