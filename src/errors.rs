//! The plugin error taxonomy.
//!
//! Every failure a run can hit falls in one of three buckets: the connection
//! to memcached, parsing a counter value, or the snapshot file on disk.
//! Each bucket maps to its own process exit code so the monitoring agent can
//! distinguish them.
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    /// Dial, write or read failure on the memcached connection.
    #[error("connection error: {context}: {source}")]
    Connection {
        context: String,
        source: io::Error,
    },
    /// A structurally matched stats line or snapshot record carried a value
    /// that does not parse as an integer.
    #[error("parse error: {0}")]
    Parse(String),
    /// Snapshot file unreadable or unwritable.
    #[error("i/o error: {context}: {source}")]
    Io {
        context: String,
        source: io::Error,
    },
}

impl PluginError {
    pub fn connection(context: impl Into<String>, source: io::Error) -> Self {
        PluginError::Connection { context: context.into(), source }
    }
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        PluginError::Io { context: context.into(), source }
    }
    /// The process exit code for this error.
    /// 0 is success and 1 is an argument parse failure, handled in main.
    pub fn exit_code(&self) -> i32 {
        match self {
            PluginError::Connection { .. } => 2,
            PluginError::Parse(_) => 3,
            PluginError::Io { .. } => 4,
        }
    }
}
