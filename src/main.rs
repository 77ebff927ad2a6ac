use clap::error::ErrorKind;
use clap::Parser;
use chrono::Utc;
use dotenv::dotenv;
use log::*;
use std::{env, process};

use mcd_stats::{metrics, runner, snapshot, Opts, PLUGIN_META_ENV};
use mcd_stats::protocol::ConnectionConfig;
use mcd_stats::runner::PollOutcome;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    dotenv().ok();
    env_logger::init();

    let options = match Opts::try_parse() {
        Ok(options) => options,
        Err(error) => {
            let _ = error.print();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };

    // metadata mode: print the graph definitions, no network call.
    if env::var(PLUGIN_META_ENV).map(|value| !value.is_empty()).unwrap_or(false) {
        return match metrics::print_graph_definitions() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("{:#}", error);
                1
            }
        };
    }

    let config = ConnectionConfig::from(&options);
    let path = snapshot::snapshot_path(&config.host, config.port);
    let now = Utc::now().timestamp();
    info!("polling {} (snapshot: {})", config.address(), path.display());

    match runner::perform_poll(&config, &path, now) {
        Ok(PollOutcome::Bootstrap) => {
            eprintln!("Notice: first time execution, no metrics to report yet");
            0
        }
        Ok(PollOutcome::Metrics(samples)) => {
            debug!("emitted {} metric lines", samples.len());
            0
        }
        Err(error) => {
            eprintln!("{}", error);
            error.exit_code()
        }
    }
}
