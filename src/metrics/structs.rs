//! The structs
//!
use std::fmt;

/// Prefix for every emitted metric name and graph definition.
pub const METRIC_PREFIX: &str = "memcached-lite";

/// Gauge metrics reported as-is from the current snapshot:
/// (metric name suffix, counter name).
pub const GAUGE_METRICS: [(&str, &str); 5] = [
    ("cache-usage-byte.used", "bytes"),
    ("cache-usage-byte.max", "limit_maxbytes"),
    ("cache-items.current", "curr_items"),
    ("connections.current", "curr_connections"),
    ("connections.max", "maxconns"),
];

/// Rate metrics reported as counter delta per second:
/// (metric name suffix, counter name).
pub const RATE_METRICS: [(&str, &str); 4] = [
    ("req-per-sec.get", "cmd_get"),
    ("req-per-sec.set", "cmd_set"),
    ("eviction-per-sec.total", "evictions"),
    ("eviction-per-sec.unfetched", "evicted_unfetched"),
];

/// A gauge keeps the integer the server reported, a rate is a float.
/// Display matches the mackerel sensu-style line format: integers plain,
/// floats with six decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(value) => write!(f, "{}", value),
            MetricValue::Float(value) => write!(f, "{:.6}", value),
        }
    }
}

/// One emitted metric line: name, value and the capture timestamp of the
/// current poll. Ephemeral, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub value: MetricValue,
    pub timestamp: i64,
}
