//! The structs
//!
use std::collections::BTreeMap;

/// Reserved counter name holding the capture Unix timestamp of a snapshot.
pub const TIME_KEY: &str = "_time_";

/// All counters of one poll, plus the reserved `_time_` entry.
///
/// This is the accumulator the responses of both `stats` and
/// `stats settings` are merged into, and the record that is persisted to and
/// loaded from the snapshot file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub counters: BTreeMap<String, i64>,
}
