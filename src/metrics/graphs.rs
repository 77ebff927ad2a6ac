//! The graph definitions printed in metadata mode.
//!
//! When the agent invokes the plugin with the metadata environment variable
//! set, it expects a JSON document describing the graphs the metric lines
//! belong to. This is a static declarative payload, no network call.
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use crate::metrics::METRIC_PREFIX;

#[derive(Debug, Serialize)]
pub struct GraphDefinitions {
    pub graphs: BTreeMap<String, Graph>,
}

#[derive(Debug, Serialize)]
pub struct Graph {
    pub label: String,
    pub unit: String,
    pub metrics: Vec<GraphMetric>,
}

#[derive(Debug, Serialize)]
pub struct GraphMetric {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
}

impl GraphMetric {
    fn new(name: &str, label: &str) -> Self {
        GraphMetric { name: name.to_string(), label: label.to_string(), stacked: None }
    }
    fn stacked(name: &str, label: &str) -> Self {
        GraphMetric { name: name.to_string(), label: label.to_string(), stacked: Some(true) }
    }
}

pub fn graph_definitions() -> GraphDefinitions {
    let mut graphs = BTreeMap::new();
    graphs.insert(format!("{}.cache-usage-byte", METRIC_PREFIX), Graph {
        label: format!("{} cache usage byte", METRIC_PREFIX),
        unit: "integer".to_string(),
        metrics: vec![
            GraphMetric::new("used", "Used"),
            GraphMetric::new("max", "Max"),
        ],
    });
    graphs.insert(format!("{}.cache-items", METRIC_PREFIX), Graph {
        label: format!("{} cache items", METRIC_PREFIX),
        unit: "integer".to_string(),
        metrics: vec![
            GraphMetric::stacked("current", "Used"),
        ],
    });
    graphs.insert(format!("{}.eviction-per-sec", METRIC_PREFIX), Graph {
        label: format!("{} evicted items per sec", METRIC_PREFIX),
        unit: "float".to_string(),
        metrics: vec![
            GraphMetric::new("total", "Total"),
            GraphMetric::new("unfetched", "Unfetched"),
        ],
    });
    graphs.insert(format!("{}.req-per-sec", METRIC_PREFIX), Graph {
        label: format!("{} request per sec", METRIC_PREFIX),
        unit: "float".to_string(),
        metrics: vec![
            GraphMetric::new("get", "Get"),
            GraphMetric::stacked("set", "Set"),
        ],
    });
    graphs.insert(format!("{}.cache-hit", METRIC_PREFIX), Graph {
        label: format!("{} cache hit rate", METRIC_PREFIX),
        unit: "float".to_string(),
        metrics: vec![
            GraphMetric::stacked("rate", "Rate"),
        ],
    });
    graphs.insert(format!("{}.connections", METRIC_PREFIX), Graph {
        label: format!("{} connections", METRIC_PREFIX),
        unit: "integer".to_string(),
        metrics: vec![
            GraphMetric::new("current", "Current"),
            GraphMetric::new("max", "Max"),
        ],
    });
    GraphDefinitions { graphs }
}

/// Print the graph definition document on stdout.
pub fn print_graph_definitions() -> Result<()> {
    let document = serde_json::to_string_pretty(&graph_definitions())
        .with_context(|| "Json serialization error")?;
    println!("{}", document);
    Ok(())
}
