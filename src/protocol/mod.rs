//! Module for talking the memcached text protocol over a TCP connection.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
