//! Terminal front end for the calendar

mod app;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use app::{run, App, AppState};
