//! Services for fetching day records

pub mod calendar_client;
pub mod request_seq;

pub use calendar_client::{fetch_or_empty, fetch_span, DayRecordStore, HttpDayRecordStore};
pub use request_seq::{CalendarLoader, CalendarQuery, FetchOutcome, RequestSequencer, RequestToken};
