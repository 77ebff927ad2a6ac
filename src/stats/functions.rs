//! The impls and functions
//!
use log::*;
use regex::Regex;
use crate::errors::PluginError;
use crate::stats::{StatsSnapshot, TIME_KEY};

impl StatsSnapshot {
    pub fn new() -> Self { Default::default() }
    /// Parse a raw response blob and merge the matched counters into this
    /// snapshot.
    ///
    /// The input is split on line feeds; lines matching
    /// `STAT <name> <value>` (lowercase letters and underscores, decimal
    /// digits) contribute an entry, anything else (the `END` footer, error
    /// lines, empty lines) is ignored. Calling this twice merges both
    /// responses into the same map, the second call overwriting on key
    /// collision.
    ///
    /// A line that matched the grammar but whose value does not fit an i64
    /// is an invariant violation and fails the whole call.
    pub fn merge_from(
        &mut self,
        raw: &[u8],
    ) -> Result<(), PluginError>
    {
        let stat_line = Regex::new(r"^STAT ([a-z_]+) (\d+)").unwrap();
        for line in String::from_utf8_lossy(raw).split('\n') {
            if let Some(captures) = stat_line.captures(line) {
                let name = &captures[1];
                let value = parse_counter(&captures[2])
                    .map_err(|e| PluginError::Parse(format!("invalid counter value in line {:?}: {}", line.trim_end(), e)))?;
                trace!("{} = {}", name, value);
                self.counters.insert(name.to_string(), value);
            }
        }
        Ok(())
    }
    /// Counter lookup. An absent counter reads as zero, so that counters
    /// only present in one of the two stats responses, or missing from an
    /// old snapshot, behave as a counter that has not moved yet.
    pub fn get(
        &self,
        name: &str,
    ) -> i64
    {
        self.counters.get(name).copied().unwrap_or(0)
    }
    pub fn set_capture_time(
        &mut self,
        now: i64,
    )
    {
        self.counters.insert(TIME_KEY.to_string(), now);
    }
    pub fn capture_time(&self) -> i64 {
        self.get(TIME_KEY)
    }
}

/// Parse a counter value as base-10, or base-16 when 0x-prefixed.
/// The 0x form never appears on the wire (the line grammar only matches
/// decimal digits), but snapshot files are parsed with the same rule.
pub fn parse_counter(
    value: &str,
) -> Result<i64, std::num::ParseIntError>
{
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => value.parse(),
    }
}
