//! Metrics collection.
//!
//! # Metrics
//! - `browscap_lookups_total` (counter): lookups by outcome (hit, miss, uninitialized)
//! - `browscap_catalog_entries` (gauge): entries in the installed catalog
//! - `browscap_catalog_reloads_total` (counter): catalog builds by result (ok, error)
//!
//! # Design Decisions
//! - Outcome labels are static strings, no per-user-agent cardinality

/// Result of a single lookup, used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Hit,
    Miss,
    Uninitialized,
}

impl LookupOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupOutcome::Hit => "hit",
            LookupOutcome::Miss => "miss",
            LookupOutcome::Uninitialized => "uninitialized",
        }
    }
}

pub fn record_lookup(outcome: LookupOutcome) {
    ::metrics::counter!("browscap_lookups_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_catalog_entries(entries: usize) {
    ::metrics::gauge!("browscap_catalog_entries").set(entries as f64);
}

pub fn record_reload(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    ::metrics::counter!("browscap_catalog_reloads_total", "result" => result).increment(1);
}
