//! Module for persisting and loading the counter snapshot file.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
