//! Day record store client
//!
//! Fetches pre-aggregated day records for a (kind, year) pair from the
//! site API. Any failure is logged and degraded to an empty record list so
//! the calendar renders as "no activity" instead of failing.

use std::time::Duration;

use serde::Deserialize;

use crate::calendar::GridSpan;
use crate::types::{CalendarError, CalendarKind, DayRecord, Result};

/// Calendar endpoint, relative to the API base URL
pub const CALENDAR_PATH: &str = "/api/contribution/calendar";

/// Source of day records
pub trait DayRecordStore: Send + Sync {
    /// Records for every active day of `year`, in no particular order
    fn get_calendar(&self, kind: CalendarKind, year: i32) -> Result<Vec<DayRecord>>;
}

/// Standard API response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<CalendarPayload>,
}

#[derive(Debug, Deserialize)]
struct CalendarPayload {
    #[serde(default)]
    days: Option<Vec<DayRecord>>,
}

/// Decode a calendar response body. The buffer is used as scratch space.
pub fn parse_calendar_response(body: &mut [u8]) -> Result<Vec<DayRecord>> {
    let envelope: ApiEnvelope =
        simd_json::from_slice(body).map_err(|e| CalendarError::Parse(e.to_string()))?;

    if !(200..300).contains(&envelope.code) {
        return Err(CalendarError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }

    Ok(envelope.data.and_then(|d| d.days).unwrap_or_default())
}

/// Day record store backed by the site's HTTP API
pub struct HttpDayRecordStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpDayRecordStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CalendarError::Http(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full request URL for a query
    pub fn calendar_url(&self, kind: CalendarKind, year: i32) -> String {
        format!(
            "{}{}?type={}&year={}",
            self.base_url,
            CALENDAR_PATH,
            kind.as_str(),
            year
        )
    }
}

impl DayRecordStore for HttpDayRecordStore {
    fn get_calendar(&self, kind: CalendarKind, year: i32) -> Result<Vec<DayRecord>> {
        let url = self.calendar_url(kind, year);
        tracing::debug!(%url, "fetching calendar");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CalendarError::Http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let mut body = response
            .bytes()
            .map_err(|e| CalendarError::Http(format!("failed to read body: {}", e)))?
            .to_vec();

        if !status.is_success() {
            return Err(CalendarError::Api {
                code: i64::from(status.as_u16()),
                message: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        parse_calendar_response(&mut body)
    }
}

/// Fetch one year, degrading any failure to an empty list
pub fn fetch_or_empty(store: &dyn DayRecordStore, kind: CalendarKind, year: i32) -> Vec<DayRecord> {
    match store.get_calendar(kind, year) {
        Ok(records) => {
            tracing::debug!(kind = kind.as_str(), year, days = records.len(), "calendar loaded");
            records
        }
        Err(e) => {
            tracing::error!(kind = kind.as_str(), year, error = %e, "failed to fetch contribution data");
            Vec::new()
        }
    }
}

/// Fetch every year `span` touches and concatenate the results
pub fn fetch_span(store: &dyn DayRecordStore, kind: CalendarKind, span: GridSpan) -> Vec<DayRecord> {
    span.years()
        .into_iter()
        .flat_map(|year| fetch_or_empty(store, kind, year))
        .filter(|record| record.parsed_date().is_some_and(|date| span.contains(date)))
        .collect()
}
