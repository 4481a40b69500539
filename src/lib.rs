//! Contribution calendar engine for blog posts and life records
//!
//! Turns sparse per-day activity records into a dense week-by-weekday grid,
//! maps counts to intensity, and drives the hover/selection/popover model
//! used by the terminal front end.

pub mod calendar;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
