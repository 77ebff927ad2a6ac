//! The impls and functions
//!
use log::*;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use crate::errors::PluginError;
use crate::protocol::ConnectionConfig;

/// Chunk size for a single read from the connection.
/// A read returning fewer bytes than this is taken as "no more data pending":
/// the stats responses are short and arrive in one burst.
pub const READ_CHUNK: usize = 32 * 1024;

/// Dial the configured host and port, and set the read and write deadlines
/// that apply to every subsequent operation on the stream.
pub fn connect(
    config: &ConnectionConfig,
) -> Result<TcpStream, PluginError>
{
    let address = config.address();
    debug!("connecting to {}", address);
    let stream = TcpStream::connect(&address)
        .map_err(|e| PluginError::connection(format!("couldn't connect to memcached at {}", address), e))?;
    if config.timeout > 0. {
        let deadline = Duration::from_secs_f64(config.timeout);
        stream.set_read_timeout(Some(deadline))
            .map_err(|e| PluginError::connection("couldn't set read timeout", e))?;
        stream.set_write_timeout(Some(deadline))
            .map_err(|e| PluginError::connection("couldn't set write timeout", e))?;
    }
    Ok(stream)
}

/// Write the exact byte sequence of the command to the stream.
/// The command must be CRLF terminated by the caller.
pub fn send<W: Write>(
    stream: &mut W,
    command: &[u8],
) -> Result<(), PluginError>
{
    stream.write_all(command)
        .map_err(|e| PluginError::connection("failed to send command", e))
}

/// Read the response into fixed-size chunks until end-of-stream, or until a
/// read returns fewer bytes than the chunk size, and return everything read.
pub fn receive<R: Read>(
    stream: &mut R,
) -> Result<Vec<u8>, PluginError>
{
    let mut response: Vec<u8> = Vec::new();
    loop {
        let mut chunk = [0u8; READ_CHUNK];
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                response.extend_from_slice(&chunk[..n]);
                if n < READ_CHUNK {
                    break;
                }
            }
            Err(e) => return Err(PluginError::connection("failed to read response", e)),
        }
    }
    debug!("received {} bytes", response.len());
    Ok(response)
}
