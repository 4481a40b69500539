//! Type definitions for contribcal

mod error;
mod locale;
mod record;

pub use error::*;
pub use locale::*;
pub use record::*;
