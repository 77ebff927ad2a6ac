//! Module for parsing `STAT name value` lines into a counter snapshot.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
