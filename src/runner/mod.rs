//! Module sequencing one poll: connect, fetch, compare, emit, persist.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
