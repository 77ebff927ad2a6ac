//! The impls and functions
//!
use log::*;
use crate::metrics::{MetricSample, MetricValue, GAUGE_METRICS, METRIC_PREFIX, RATE_METRICS};
use crate::stats::StatsSnapshot;

/// Counter delta between two snapshots with reset correction: a negative
/// delta means the server counter restarted (for instance after a memcached
/// restart), so the raw current value is taken instead.
fn counter_delta(
    current: i64,
    previous: i64,
) -> i64
{
    let delta = current - previous;
    if delta < 0 {
        current
    } else {
        delta
    }
}

/// Compute all metric samples for the current snapshot against the previous
/// one. Pure computation over already-validated maps; this cannot fail.
///
/// Every sample carries the capture timestamp of the current snapshot.
/// When the elapsed period between the snapshots is not positive (clock
/// stepped backwards, or two runs within the same second), the per-second
/// rates are undefined: the rate and hit-rate samples are skipped and only
/// the gauges are reported.
pub fn compute_metrics(
    current: &StatsSnapshot,
    previous: &StatsSnapshot,
) -> Vec<MetricSample>
{
    let now = current.capture_time();
    let period = now - previous.capture_time();
    debug!("elapsed period between snapshots: {}s", period);

    let mut samples: Vec<MetricSample> = Vec::new();

    for (suffix, counter) in GAUGE_METRICS {
        samples.push(MetricSample {
            name: format!("{}.{}", METRIC_PREFIX, suffix),
            value: MetricValue::Integer(current.get(counter)),
            timestamp: now,
        });
    }

    if period <= 0 {
        warn!("non-positive elapsed period ({}s), skipping rate metrics", period);
        return samples;
    }

    for (suffix, counter) in RATE_METRICS {
        let delta = counter_delta(current.get(counter), previous.get(counter));
        samples.push(MetricSample {
            name: format!("{}.{}", METRIC_PREFIX, suffix),
            value: MetricValue::Float(delta as f64 / period as f64),
            timestamp: now,
        });
    }

    let hits = counter_delta(current.get("get_hits"), previous.get("get_hits"));
    let misses = counter_delta(current.get("get_misses"), previous.get("get_misses"));
    let hit_rate = if hits + misses <= 0 {
        0.
    } else {
        100. * hits as f64 / (hits + misses) as f64
    };
    samples.push(MetricSample {
        name: format!("{}.cache-hit.rate", METRIC_PREFIX),
        value: MetricValue::Float(hit_rate),
        timestamp: now,
    });

    samples
}

/// Emit the samples on stdout, one `name<TAB>value<TAB>timestamp` line per
/// metric, the format the monitoring agent consumes.
pub fn print(
    samples: &[MetricSample],
)
{
    for sample in samples {
        println!("{}\t{}\t{}", sample.name, sample.value, sample.timestamp);
    }
}
