//! Viewport-constrained overlay placement
//!
//! All values are layout units in viewport coordinates (origin top-left).
//! Placement is a pure function of the trigger and viewport, so hosts
//! re-run it on every layout change while an overlay is open.

use serde::Serialize;

/// Minimum distance between an overlay and the viewport edge
pub const EDGE_MARGIN: f64 = 8.0;

/// Fixed popover size. Content is assumed to fit; real size is never measured.
pub const POPOVER_SIZE: Size = Size {
    width: 320.0,
    height: 300.0,
};

/// Gap between a trigger and its popover
pub const POPOVER_SPACING: f64 = 8.0;

/// Fixed hover tooltip width
pub const TOOLTIP_WIDTH: f64 = 140.0;

/// Gap between a trigger's bottom edge and its tooltip
pub const TOOLTIP_OFFSET: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle by its edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Edges inclusive on the top-left, exclusive on the bottom-right
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Top-left corner chosen for an overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
}

impl Placement {
    pub fn bounds(self, size: Size) -> Bounds {
        Bounds::new(self.left, self.top, size.width, size.height)
    }
}

/// Place a fixed-size overlay next to `trigger`.
///
/// Below and left-aligned by default; right-aligned when that would run past
/// the right edge; flipped above when it would run past the bottom. The
/// result is finally clamped to `[8, viewport - overlay - 8]` on each axis.
/// When the viewport is too small for that range the lower bound wins.
pub fn place_overlay(trigger: Bounds, overlay: Size, spacing: f64, viewport: Size) -> Placement {
    let mut left = trigger.left;
    let mut top = trigger.bottom + spacing;

    if left + overlay.width > viewport.width {
        left = trigger.right - overlay.width;
    }
    if top + overlay.height > viewport.height {
        top = trigger.top - overlay.height - spacing;
    }

    Placement {
        left: clamp_to_edges(left, overlay.width, viewport.width),
        top: clamp_to_edges(top, overlay.height, viewport.height),
    }
}

/// Place the popover for a selected cell
pub fn place_popover(trigger: Bounds, viewport: Size) -> Placement {
    place_overlay(trigger, POPOVER_SIZE, POPOVER_SPACING, viewport)
}

/// Place the hover tooltip: centered under the trigger, clamped horizontally
pub fn place_tooltip(trigger: Bounds, viewport: Size) -> Placement {
    let center = trigger.left + trigger.width() / 2.0;
    Placement {
        left: clamp_to_edges(center - TOOLTIP_WIDTH / 2.0, TOOLTIP_WIDTH, viewport.width),
        top: trigger.bottom + TOOLTIP_OFFSET,
    }
}

fn clamp_to_edges(value: f64, extent: f64, viewport: f64) -> f64 {
    value
        .min(viewport - extent - EDGE_MARGIN)
        .max(EDGE_MARGIN)
}
