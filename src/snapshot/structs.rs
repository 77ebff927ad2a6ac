//! The structs
//!
use serde::Serialize;

/// One record of the snapshot file: tab-separated `name<TAB>count`.
#[derive(Debug, Serialize)]
pub struct StoredCounter {
    pub name: String,
    pub count: i64,
}
