//! mcd_stats: a mackerel-agent plugin that polls a memcached server over the
//! text protocol, keeps a snapshot of its counters on disk, and reports
//! per-second rates and gauges computed against the previous snapshot.
//!
use clap::Parser;

pub mod errors;
pub mod protocol;
pub mod stats;
pub mod snapshot;
pub mod metrics;
pub mod runner;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 11211;
pub const DEFAULT_TIMEOUT: f64 = 10.;
/// When this environment variable is set non-empty, the plugin prints the
/// graph definitions instead of polling the server.
pub const PLUGIN_META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

/// The commandline options.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Opts {
    /// Hostname of the memcached server.
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Port of the memcached server.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Seconds before a read or write on the connection times out.
    /// Zero or negative disables the timeout.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: f64,
}
