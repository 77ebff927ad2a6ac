//! The structs
//!
use crate::Opts;

/// The connection target and the per-operation deadline.
/// Immutable for the duration of one run.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    /// Seconds before a single read or write times out.
    /// Zero or negative disables the deadline.
    pub timeout: f64,
}

impl ConnectionConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&Opts> for ConnectionConfig {
    fn from(options: &Opts) -> Self {
        ConnectionConfig {
            host: options.host.clone(),
            port: options.port,
            timeout: options.timeout,
        }
    }
}
