//! Trace extraction engine.
//!
//! Groups a flat event log into per-case traces:
//! - Every timestamp is parsed up front; one bad value aborts the whole run
//! - Events are stable-sorted by timestamp (ties keep log order)
//! - Events are grouped by case, preserving the sorted order

use crate::types::{Event, EventLog, ProcessEvent};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use procscope_core::{
    domain::Domain,
    engine::EngineMetadata,
    error::{ProcessError, Result},
    traits::Engine,
};

/// Naive date-time layouts accepted after RFC 3339 and RFC 2822; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a log timestamp into UTC.
///
/// Accepts RFC 3339, RFC 2822, ISO 8601 without offset (UTC assumed) and bare
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("is empty".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err("is not a recognised date/time".to_string())
}

/// Trace extraction engine.
#[derive(Debug, Clone)]
pub struct TraceExtraction {
    metadata: EngineMetadata,
}

impl Default for TraceExtraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceExtraction {
    /// Create a new trace extraction engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("procint/trace-extraction", Domain::ProcessMining)
                .with_description("Per-case trace extraction from a flat event log")
                .with_cost("O(n log n)"),
        }
    }

    /// Extract traces from an event log.
    ///
    /// Fails with `EmptyLog` for an empty input and with `MalformedEvent` for the
    /// first unparsable timestamp; no partial log is returned.
    pub fn compute(events: &[Event]) -> Result<EventLog> {
        if events.is_empty() {
            return Err(ProcessError::EmptyLog);
        }

        let mut parsed = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            let timestamp = parse_timestamp(&event.timestamp).map_err(|reason| {
                ProcessError::malformed_event(index, &event.case_id, &event.timestamp, reason)
            })?;

            parsed.push(ProcessEvent {
                position: index,
                case_id: event.case_id.clone(),
                activity: event.activity.clone(),
                timestamp,
            });
        }

        // Stable: equal timestamps keep their log order
        parsed.sort_by_key(|e| e.timestamp);

        let mut log = EventLog::new();
        for event in parsed {
            log.add_event(event);
        }

        tracing::debug!(
            events = events.len(),
            traces = log.trace_count(),
            "Extracted traces"
        );

        Ok(log)
    }
}

impl Engine for TraceExtraction {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}
