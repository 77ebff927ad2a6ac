//! The structs
//!
use crate::metrics::MetricSample;

/// The result of a successful poll.
///
/// The very first run against a target has no previous snapshot to compare
/// with: it only persists the current counters and emits nothing.
#[derive(Debug, PartialEq)]
pub enum PollOutcome {
    Bootstrap,
    Metrics(Vec<MetricSample>),
}
