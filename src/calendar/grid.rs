//! Week-by-weekday grid construction
//!
//! Expands a span of calendar days into whole Monday-first weeks and joins
//! every day against the fetched records by its `YYYY-MM-DD` key. The grid's
//! shape depends only on the calendar, never on which days have data.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::types::{date_key, DayRecord};

/// Rows per week column (Monday..Sunday)
pub const DAYS_PER_WEEK: usize = 7;

/// Widest grid a single year can span (leap year starting on a Sunday)
pub const MAX_WEEKS: usize = 54;

/// Week count assumed before a grid exists
pub const DEFAULT_WEEKS: usize = 53;

/// Length of the rolling window, in days
const TRAILING_DAYS: u64 = 365;

/// Range of days a grid covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSpan {
    /// Jan 1 to Dec 31 of a calendar year
    Year(i32),
    /// The 365 days ending at `end`, inclusive
    Trailing { end: NaiveDate },
}

impl GridSpan {
    /// First and last day covered, `None` when the year is out of chrono's range
    pub fn bounds(self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Year(year) => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            Self::Trailing { end } => {
                Some((end.checked_sub_days(Days::new(TRAILING_DAYS - 1))?, end))
            }
        }
    }

    /// Every calendar year the span touches, ascending
    pub fn years(self) -> Vec<i32> {
        match self.bounds() {
            Some((first, last)) => (first.year()..=last.year()).collect(),
            None => Vec::new(),
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        self.bounds()
            .is_some_and(|(first, last)| first <= date && date <= last)
    }

    /// Short human label ("2024", "2023-03-12 – 2024-03-10")
    pub fn label(self) -> String {
        match (self, self.bounds()) {
            (Self::Year(year), _) => year.to_string(),
            (Self::Trailing { .. }, Some((first, last))) => {
                format!("{} – {}", date_key(first), date_key(last))
            }
            (Self::Trailing { end }, None) => date_key(end),
        }
    }
}

/// Position of a cell: week column and weekday row (Monday = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellPos {
    pub week: usize,
    pub weekday: usize,
}

impl CellPos {
    pub fn new(week: usize, weekday: usize) -> Self {
        Self { week, weekday }
    }
}

/// One slot of the grid. The default value is a padding cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Real date, `None` for alignment padding
    pub date: Option<NaiveDate>,
    /// Matching record, `None` for days without activity
    pub record: Option<DayRecord>,
}

impl GridCell {
    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    pub fn count(&self) -> u32 {
        self.record.as_ref().map_or(0, |r| r.count)
    }

    /// Non-empty cells are the only selectable ones
    pub fn has_activity(&self) -> bool {
        self.record.as_ref().is_some_and(DayRecord::has_activity)
    }
}

/// Materialized grid: weeks of exactly seven cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    span: GridSpan,
    weeks: Vec<[GridCell; DAYS_PER_WEEK]>,
}

impl CalendarGrid {
    pub fn span(&self) -> GridSpan {
        self.span
    }

    pub fn weeks(&self) -> &[[GridCell; DAYS_PER_WEEK]] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Week count to size the layout with (never zero)
    pub fn layout_columns(&self) -> usize {
        if self.weeks.is_empty() {
            DEFAULT_WEEKS
        } else {
            self.weeks.len()
        }
    }

    pub fn cell(&self, pos: CellPos) -> Option<&GridCell> {
        self.weeks.get(pos.week)?.get(pos.weekday)
    }

    /// All cells with their positions, column by column
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &GridCell)> {
        self.weeks.iter().enumerate().flat_map(|(week, days)| {
            days.iter()
                .enumerate()
                .map(move |(weekday, cell)| (CellPos::new(week, weekday), cell))
        })
    }

    /// Number of non-padding cells
    pub fn real_days(&self) -> usize {
        self.cells().filter(|(_, cell)| !cell.is_padding()).count()
    }

    /// Position of a calendar date, if the grid covers it
    pub fn position_of(&self, date: NaiveDate) -> Option<CellPos> {
        self.cells()
            .find(|(_, cell)| cell.date == Some(date))
            .map(|(pos, _)| pos)
    }

    /// First real date of a week column
    pub fn week_start(&self, week: usize) -> Option<NaiveDate> {
        self.weeks.get(week)?.iter().find_map(|cell| cell.date)
    }
}

/// Build the grid for `span`, joining `records` by date key.
///
/// Duplicate keys keep the last record. Records outside the span are ignored.
pub fn build_grid(records: &[DayRecord], span: GridSpan) -> CalendarGrid {
    let Some((first, last)) = span.bounds() else {
        return CalendarGrid {
            span,
            weeks: Vec::new(),
        };
    };

    let mut by_date: HashMap<&str, &DayRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if by_date.insert(record.date.as_str(), record).is_some() {
            tracing::debug!(date = %record.date, "duplicate day record, keeping the last one");
        }
    }

    let leading = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<GridCell> = Vec::with_capacity(leading + 366 + DAYS_PER_WEEK);
    cells.resize_with(leading, GridCell::default);

    cells.extend(
        first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| GridCell {
                date: Some(date),
                record: by_date.get(date_key(date).as_str()).map(|r| (*r).clone()),
            }),
    );

    let trailing = (DAYS_PER_WEEK - cells.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    cells.resize_with(cells.len() + trailing, GridCell::default);

    let weeks = cells
        .chunks_mut(DAYS_PER_WEEK)
        .map(|chunk| std::array::from_fn(|i| std::mem::take(&mut chunk[i])))
        .collect();

    CalendarGrid { span, weeks }
}
