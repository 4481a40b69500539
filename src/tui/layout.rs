//! Terminal cells <-> layout units
//!
//! The engine measures in abstract units. One terminal column is 8 units
//! wide and one row 16 units tall, roughly the aspect of a monospace glyph.

use ratatui::layout::{Position, Rect};

use crate::calendar::sizer::CELL_GAP;
use crate::calendar::{cell_size, Bounds, CellPos, Placement, Point, Size};

/// Units per terminal column
pub const COL_UNITS: f64 = 8.0;

/// Units per terminal row
pub const ROW_UNITS: f64 = 16.0;

/// Viewport size of `area` in units
pub fn viewport_size(area: Rect) -> Size {
    Size {
        width: f64::from(area.width) * COL_UNITS,
        height: f64::from(area.height) * ROW_UNITS,
    }
}

/// Bounds of `rect` in units, relative to `viewport`'s origin
pub fn rect_to_bounds(rect: Rect, viewport: Rect) -> Bounds {
    Bounds::new(
        f64::from(rect.x.saturating_sub(viewport.x)) * COL_UNITS,
        f64::from(rect.y.saturating_sub(viewport.y)) * ROW_UNITS,
        f64::from(rect.width) * COL_UNITS,
        f64::from(rect.height) * ROW_UNITS,
    )
}

/// Center of a terminal cell in units
pub fn position_to_point(position: Position, viewport: Rect) -> Point {
    Point {
        x: (f64::from(position.x.saturating_sub(viewport.x)) + 0.5) * COL_UNITS,
        y: (f64::from(position.y.saturating_sub(viewport.y)) + 0.5) * ROW_UNITS,
    }
}

/// Terminal rect covering an overlay of `size` at `placement`, clipped to `viewport`
pub fn placement_to_rect(placement: Placement, size: Size, viewport: Rect) -> Rect {
    let rect = Rect {
        x: viewport.x.saturating_add((placement.left / COL_UNITS).round() as u16),
        y: viewport.y.saturating_add((placement.top / ROW_UNITS).round() as u16),
        width: (size.width / COL_UNITS).ceil() as u16,
        height: (size.height / ROW_UNITS).ceil() as u16,
    };
    rect.intersection(viewport)
}

/// Where each grid cell lands inside the grid area.
///
/// Cells are one row tall. Their width follows the responsive cell size;
/// week columns get a one-column gap when the area is wide enough for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarLayout {
    area: Rect,
    weeks: usize,
    cell_width: u16,
    pitch: u16,
}

impl CalendarLayout {
    pub fn new(area: Rect, weeks: usize) -> Self {
        let columns = weeks.max(1);
        let size = cell_size(f64::from(area.width) * COL_UNITS, columns, CELL_GAP);
        let cell_width = ((size / COL_UNITS).floor() as u16).max(1);

        let with_gap = (u64::from(cell_width) + 1) * columns as u64 - 1;
        let pitch = if with_gap <= u64::from(area.width) {
            cell_width + 1
        } else {
            cell_width
        };

        Self {
            area,
            weeks,
            cell_width,
            pitch,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    /// Left column of a week, if it is on screen
    pub fn week_x(&self, week: usize) -> Option<u16> {
        if week >= self.weeks {
            return None;
        }
        let offset = u16::try_from(week).ok()?.checked_mul(self.pitch)?;
        let x = self.area.x.checked_add(offset)?;
        (x + self.cell_width <= self.area.right()).then_some(x)
    }

    /// Terminal rect of a cell, `None` when clipped
    pub fn cell_rect(&self, pos: CellPos) -> Option<Rect> {
        let x = self.week_x(pos.week)?;
        let y = self.area.y + u16::try_from(pos.weekday).ok()?;
        (y < self.area.bottom()).then_some(Rect::new(x, y, self.cell_width, 1))
    }

    /// Hit-test a terminal position; gaps and empty space miss
    pub fn cell_at(&self, position: Position) -> Option<CellPos> {
        if !self.area.contains(position) {
            return None;
        }
        let dx = position.x - self.area.x;
        if dx % self.pitch >= self.cell_width {
            return None;
        }
        let week = usize::from(dx / self.pitch);
        let weekday = usize::from(position.y - self.area.y);
        let pos = CellPos::new(week, weekday);
        self.cell_rect(pos).map(|_| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CalendarLayout tests ==========

    #[test]
    fn test_layout_medium_terminal_has_gaps() {
        // 960 units: (960 - 52 * 4) / 53 = 14.2 -> 1 column, gap fits in 105
        let layout = CalendarLayout::new(Rect::new(0, 0, 120, 7), 53);
        assert_eq!(layout.cell_width(), 1);
        assert_eq!(layout.cell_rect(CellPos::new(3, 2)), Some(Rect::new(6, 2, 1, 1)));
        assert_eq!(layout.cell_at(Position::new(6, 2)), Some(CellPos::new(3, 2)));
        assert_eq!(layout.cell_at(Position::new(7, 2)), None);
    }

    #[test]
    fn test_layout_narrow_terminal_drops_gaps() {
        let layout = CalendarLayout::new(Rect::new(0, 0, 80, 7), 53);
        assert_eq!(layout.cell_width(), 1);
        assert_eq!(layout.cell_rect(CellPos::new(52, 6)), Some(Rect::new(52, 6, 1, 1)));
        assert_eq!(layout.cell_at(Position::new(52, 6)), Some(CellPos::new(52, 6)));
    }

    #[test]
    fn test_layout_wide_terminal_grows_cells() {
        // 1760 units: (1760 - 208) / 53 = 29.3 -> 3 columns
        let layout = CalendarLayout::new(Rect::new(5, 3, 220, 7), 53);
        assert_eq!(layout.cell_width(), 3);
        assert_eq!(layout.cell_rect(CellPos::new(1, 0)), Some(Rect::new(9, 3, 3, 1)));
        assert_eq!(layout.cell_at(Position::new(11, 3)), Some(CellPos::new(1, 0)));
        assert_eq!(layout.cell_at(Position::new(12, 3)), None);
    }

    #[test]
    fn test_layout_tiny_terminal_clips() {
        let layout = CalendarLayout::new(Rect::new(0, 0, 30, 7), 53);
        assert_eq!(layout.cell_width(), 1);
        assert!(layout.cell_rect(CellPos::new(29, 0)).is_some());
        assert!(layout.cell_rect(CellPos::new(30, 0)).is_none());
        assert!(layout.cell_at(Position::new(29, 7)).is_none());
    }

    #[test]
    fn test_layout_rejects_out_of_range() {
        let layout = CalendarLayout::new(Rect::new(0, 0, 120, 7), 52);
        assert!(layout.cell_rect(CellPos::new(52, 0)).is_none());
        assert!(layout.cell_rect(CellPos::new(0, 7)).is_none());
    }

    // ========== unit conversion tests ==========

    #[test]
    fn test_viewport_size() {
        let size = viewport_size(Rect::new(0, 0, 100, 40));
        assert_eq!(size.width, 800.0);
        assert_eq!(size.height, 640.0);
    }

    #[test]
    fn test_point_is_cell_center() {
        let viewport = Rect::new(0, 0, 100, 40);
        let point = position_to_point(Position::new(2, 1), viewport);
        assert_eq!(point, Point { x: 20.0, y: 24.0 });
        assert!(rect_to_bounds(Rect::new(2, 1, 1, 1), viewport).contains(point));
        assert!(!rect_to_bounds(Rect::new(3, 1, 1, 1), viewport).contains(point));
    }

    #[test]
    fn test_placement_to_rect_rounds_and_clips() {
        let viewport = Rect::new(0, 0, 100, 40);
        let size = Size {
            width: 320.0,
            height: 300.0,
        };
        let rect = placement_to_rect(Placement { top: 8.0, left: 8.0 }, size, viewport);
        assert_eq!(rect, Rect::new(1, 1, 40, 19));

        let clipped = placement_to_rect(Placement { top: 560.0, left: 720.0 }, size, viewport);
        assert_eq!(clipped, Rect::new(90, 35, 10, 5));
    }
}
