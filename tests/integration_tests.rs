//! End-to-end tests against a canned memcached server on a loopback socket.
use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use mcd_stats::errors::PluginError;
use mcd_stats::metrics::{MetricSample, MetricValue};
use mcd_stats::protocol::ConnectionConfig;
use mcd_stats::runner::{perform_poll, PollOutcome};
use mcd_stats::snapshot;
use mcd_stats::stats::StatsSnapshot;

/// Serve one connection: read a command line, answer with the canned
/// response, twice (`stats`, then `stats settings`).
fn spawn_memcached_mock(stats: &'static str, settings: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        for response in [stats, settings] {
            let mut command = String::new();
            reader.read_line(&mut command).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        }
    });
    port
}

fn scratch_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("mcd-stats-integration-{}-{}", std::process::id(), name))
}

fn config(port: u16) -> ConnectionConfig {
    ConnectionConfig {
        host: "127.0.0.1".to_string(),
        port,
        timeout: 10.,
    }
}

#[test]
fn integration_bootstrap_run_writes_snapshot_without_metrics() {
    let port = spawn_memcached_mock(
        "STAT cmd_get 100\r\nSTAT bytes 1000\r\nEND\r\n",
        "STAT maxconns 1024\r\nEND\r\n",
    );
    let path = scratch_path("bootstrap");

    let outcome = perform_poll(&config(port), &path, 1700000000).unwrap();
    assert_eq!(outcome, PollOutcome::Bootstrap);

    let saved = snapshot::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(saved.get("cmd_get"), 100);
    assert_eq!(saved.get("maxconns"), 1024);
    assert_eq!(saved.capture_time(), 1700000000);
}

#[test]
fn integration_second_run_reports_rates_and_gauges() {
    let path = scratch_path("second-run");
    let mut previous = StatsSnapshot::new();
    previous.counters.insert("cmd_get".to_string(), 100);
    previous.set_capture_time(1700000000);
    snapshot::save(&path, &previous).unwrap();

    let port = spawn_memcached_mock(
        "STAT bytes 1000\r\nSTAT limit_maxbytes 2000\r\nSTAT cmd_get 160\r\nEND\r\n",
        "STAT maxconns 1024\r\nEND\r\n",
    );
    let outcome = perform_poll(&config(port), &path, 1700000060).unwrap();

    let saved = snapshot::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    // the file now holds the current counters as baseline for the next run
    assert_eq!(saved.get("cmd_get"), 160);

    let samples = match outcome {
        PollOutcome::Metrics(samples) => samples,
        PollOutcome::Bootstrap => panic!("expected metrics, got bootstrap"),
    };
    assert!(samples.contains(&MetricSample {
        name: "memcached-lite.req-per-sec.get".to_string(),
        value: MetricValue::Float(1.),
        timestamp: 1700000060,
    }));
    assert!(samples.contains(&MetricSample {
        name: "memcached-lite.cache-usage-byte.used".to_string(),
        value: MetricValue::Integer(1000),
        timestamp: 1700000060,
    }));
    assert!(samples.contains(&MetricSample {
        name: "memcached-lite.connections.max".to_string(),
        value: MetricValue::Integer(1024),
        timestamp: 1700000060,
    }));
}

#[test]
fn integration_unreachable_server_is_a_connection_error() {
    // bind and immediately drop to find a port nothing listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let path = scratch_path("unreachable");

    let result = perform_poll(&config(port), &path, 1700000000);
    match result {
        Err(error @ PluginError::Connection { .. }) => assert_eq!(error.exit_code(), 2),
        other => panic!("expected connection error, got {:?}", other),
    }
    // fail-fast: no snapshot may have been written
    assert!(!snapshot::exists(&path));
}
