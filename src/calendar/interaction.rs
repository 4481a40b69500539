//! Hover / selection state machine
//!
//! A single tagged state makes "tooltip and popover at once" unrepresentable.
//! Transitions are pure and driven by synchronous pointer events.

use super::grid::{CalendarGrid, CellPos};
use super::positioner::{Bounds, Point};

/// Interaction state of one rendered calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Tooltip shown for a cell (empty or not)
    Hovering(CellPos),
    /// Popover open for a non-empty cell
    Selected(CellPos),
}

/// Pointer input, already hit-tested to grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(CellPos),
    Leave(CellPos),
    Click(CellPos),
    /// Close button on the popover
    Close,
}

/// Reports whether a pointer press landed outside an open overlay and its trigger
pub trait OutsideClick {
    fn is_outside(&self, point: Point) -> bool;
}

/// Hit area of an open popover: the overlay plus the cell that opened it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayHitArea {
    pub overlay: Bounds,
    pub trigger: Bounds,
}

impl OutsideClick for OverlayHitArea {
    fn is_outside(&self, point: Point) -> bool {
        !self.overlay.contains(point) && !self.trigger.contains(point)
    }
}

impl InteractionState {
    pub fn hovered(self) -> Option<CellPos> {
        match self {
            Self::Hovering(pos) => Some(pos),
            _ => None,
        }
    }

    pub fn selected(self) -> Option<CellPos> {
        match self {
            Self::Selected(pos) => Some(pos),
            _ => None,
        }
    }

    /// Apply one event. Padding and out-of-range cells are never interactive.
    pub fn apply(self, event: PointerEvent, grid: &CalendarGrid) -> Self {
        match event {
            PointerEvent::Enter(pos) => match self {
                Self::Selected(_) => self,
                _ if is_interactive(grid, pos) => Self::Hovering(pos),
                _ => self,
            },
            PointerEvent::Leave(pos) => match self {
                Self::Hovering(hovered) if hovered == pos => Self::Idle,
                _ => self,
            },
            PointerEvent::Click(pos) => {
                let Some(cell) = grid.cell(pos).filter(|cell| !cell.is_padding()) else {
                    return self;
                };
                match self {
                    Self::Selected(current) if current == pos => Self::Idle,
                    // Selected(a) -> Idle -> Selected(b): nothing of `a` carries over
                    Self::Selected(_) if cell.has_activity() => Self::Selected(pos),
                    Self::Selected(_) => Self::Idle,
                    // Selecting drops any hover
                    _ if cell.has_activity() => Self::Selected(pos),
                    _ => self,
                }
            }
            PointerEvent::Close => match self {
                Self::Selected(_) => Self::Idle,
                _ => self,
            },
        }
    }

    /// Dismiss an open selection when a press lands outside its hit area.
    ///
    /// Call for a press before dispatching the press as a [`PointerEvent::Click`],
    /// so the press that opened a selection is never seen by this check.
    pub fn press_outside(self, point: Point, area: &impl OutsideClick) -> Self {
        match self {
            Self::Selected(_) if area.is_outside(point) => Self::Idle,
            _ => self,
        }
    }

    /// Move the pointer to `target` (or off the grid), emitting leave/enter
    pub fn hover_to(self, target: Option<CellPos>, grid: &CalendarGrid) -> Self {
        let mut next = self;
        if let Self::Hovering(current) = self {
            if Some(current) == target {
                return self;
            }
            next = next.apply(PointerEvent::Leave(current), grid);
        }
        match target {
            Some(pos) => next.apply(PointerEvent::Enter(pos), grid),
            None => next,
        }
    }
}

fn is_interactive(grid: &CalendarGrid, pos: CellPos) -> bool {
    grid.cell(pos).is_some_and(|cell| !cell.is_padding())
}
