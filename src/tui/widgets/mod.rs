//! TUI widgets

pub mod calendar;
pub mod help;
pub mod legend;
pub mod popover;
pub mod spinner;
pub mod tooltip;
