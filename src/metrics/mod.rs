//! Module for computing and emitting the metric samples, and for the
//! metadata-mode graph definitions.
//!
mod structs;
mod functions;
mod graphs;

pub use structs::*;
pub use functions::*;
pub use graphs::*;
