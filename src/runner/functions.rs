//! The impls and functions
//!
use log::*;
use std::io::{Read, Write};
use std::path::Path;
use crate::errors::PluginError;
use crate::metrics;
use crate::protocol::{self, ConnectionConfig};
use crate::runner::PollOutcome;
use crate::snapshot;
use crate::stats::StatsSnapshot;

pub const STATS_COMMAND: &[u8] = b"stats\r\n";
pub const STATS_SETTINGS_COMMAND: &[u8] = b"stats settings\r\n";

/// Perform one poll against the configured target.
///
/// Sequence: connect, fetch `stats`, fetch `stats settings`, compare against
/// the previous snapshot, emit the metric lines, persist the current
/// snapshot. Any connection or file failure aborts the run immediately;
/// there are no retries. Comparing and emitting are pure computation and
/// cannot fail.
///
/// `now` is the capture time of this poll in Unix seconds, passed in
/// explicitly so runs are deterministic under test.
pub fn perform_poll(
    config: &ConnectionConfig,
    path: &Path,
    now: i64,
) -> Result<PollOutcome, PluginError>
{
    let mut stream = protocol::connect(config)?;
    let current = fetch_current(&mut stream, now)?;
    evaluate(path, &current)
}

/// Fetch both stats responses over an open stream and merge them into one
/// snapshot stamped with the capture time.
pub fn fetch_current<S: Read + Write>(
    stream: &mut S,
    now: i64,
) -> Result<StatsSnapshot, PluginError>
{
    let mut current = StatsSnapshot::new();
    protocol::send(stream, STATS_COMMAND)?;
    current.merge_from(&protocol::receive(stream)?)?;
    protocol::send(stream, STATS_SETTINGS_COMMAND)?;
    current.merge_from(&protocol::receive(stream)?)?;
    current.set_capture_time(now);
    info!("fetched {} counters", current.counters.len());
    Ok(current)
}

/// The compare, emit and persist tail of a poll.
///
/// Without a previous snapshot file this is a bootstrap run: the current
/// counters are persisted and no metrics are emitted. Otherwise the metrics
/// are computed against the loaded previous snapshot and printed before the
/// file is replaced with the current counters.
pub fn evaluate(
    path: &Path,
    current: &StatsSnapshot,
) -> Result<PollOutcome, PluginError>
{
    if !snapshot::exists(path) {
        snapshot::save(path, current)?;
        info!("no previous snapshot at {}, bootstrap run", path.display());
        return Ok(PollOutcome::Bootstrap);
    }
    let previous = snapshot::load(path)?;
    let samples = metrics::compute_metrics(current, &previous);
    metrics::print(&samples);
    snapshot::save(path, current)?;
    Ok(PollOutcome::Metrics(samples))
}
