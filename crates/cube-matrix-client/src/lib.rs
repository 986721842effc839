//! Cube Matrix Device Client
//!
//! Synchronous TCP client for a single networked cube matrix fixture.
//! Every command opens a fresh connection, writes one CRLF-terminated
//! JSON frame, and (outside streaming mode) reads line-delimited JSON
//! until a reply arrives. Connect and read are both bounded by fixed
//! timeouts; there are no retries and no background tasks.

pub mod protocol;

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use protocol::{Frame, Request, EFFECT_DURATION_MS};

pub use protocol::DEFAULT_PORT;

/// Bound on establishing the TCP connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound on each socket read while waiting for the reply.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Result type alias using our ClientError type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the fixture.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or timeout. The command may or may not have
    /// reached the fixture.
    #[error("connection error to {addr} during {method}: {source}")]
    Connection {
        addr: SocketAddr,
        method: String,
        #[source]
        source: std::io::Error,
    },

    /// Command frame could not be serialized.
    #[error("failed to encode {method} frame: {source}")]
    Encode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// The fixture answered with an explicit error object.
    #[error("fixture rejected {method}: {error}")]
    Device { method: String, error: Value },

    /// The connection ended before a well-formed reply frame arrived.
    #[error("connection to {addr} closed before a reply to {method}")]
    ClosedEarly { addr: SocketAddr, method: String },
}

/// Synchronous wire-protocol client for one fixture.
///
/// The command-id counter is owned per instance; two clients never
/// share state. In streaming mode (the fixture's optimistic-apply
/// state, entered via `activate_fx_mode`) commands are fire-and-forget
/// and `send` fabricates a success reply without reading the socket.
pub struct DeviceClient {
    addr: SocketAddr,
    next_id: u64,
    streaming: bool,
    last_properties: Map<String, Value>,
}

impl DeviceClient {
    /// Creates a client for the fixture at `addr`.
    pub fn new(addr: SocketAddr) -> Self {
        Self::with_start_id(addr, 1)
    }

    /// Creates a client whose command ids start at `start_id`.
    pub fn with_start_id(addr: SocketAddr, start_id: u64) -> Self {
        Self {
            addr,
            next_id: start_id,
            streaming: false,
            last_properties: Map::new(),
        }
    }

    /// Returns the fixture address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Enables or disables fire-and-forget streaming mode.
    pub fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }

    /// Returns true when commands are fire-and-forget.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Last-known asynchronous device properties, accumulated from
    /// unsolicited `props` pushes.
    pub fn last_properties(&self) -> &Map<String, Value> {
        &self.last_properties
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Frames and sends one command, returning the fixture's reply.
    pub fn send(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = Request {
            id: self.next_id(),
            method: method.to_string(),
            params,
        };
        let frame = request.frame().map_err(|source| ClientError::Encode {
            method: method.to_string(),
            source,
        })?;

        let connection = |source| ClientError::Connection {
            addr: self.addr,
            method: method.to_string(),
            source,
        };

        let mut stream = TcpStream::connect_timeout(&self.addr, CONNECT_TIMEOUT)
            .map_err(connection)?;
        stream
            .set_read_timeout(Some(RESPONSE_TIMEOUT))
            .map_err(connection)?;

        debug!("sending to {}: {}", self.addr, frame.trim_end());
        stream.write_all(frame.as_bytes()).map_err(connection)?;

        if self.streaming {
            // The fixture applies updates optimistically; no ack is read.
            return Ok(json!({"result": ["ok"]}));
        }

        self.read_reply(stream, method)
    }

    /// Reads line-delimited JSON until a reply frame arrives.
    ///
    /// `props` pushes are merged into the properties cache and
    /// discarded. Malformed lines are skipped; only the connection
    /// ending without any well-formed reply is fatal.
    fn read_reply(&mut self, stream: TcpStream, method: &str) -> Result<Value> {
        let addr = self.addr;
        let mut reader = BufReader::new(stream);
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|source| ClientError::Connection {
                    addr,
                    method: method.to_string(),
                    source,
                })?;
            if read == 0 {
                return Err(ClientError::ClosedEarly {
                    addr,
                    method: method.to_string(),
                });
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value: Value = match serde_json::from_str(trimmed) {
                Ok(value) => value,
                Err(err) => {
                    warn!("skipping invalid frame from {addr}: {err}");
                    continue;
                }
            };
            debug!("received from {addr}: {value}");

            match protocol::classify(value) {
                Frame::Props(params) => {
                    for (key, value) in params {
                        self.last_properties.insert(key, value);
                    }
                }
                Frame::Reply(value) => {
                    if let Some(error) = value.get("error") {
                        return Err(ClientError::Device {
                            method: method.to_string(),
                            error: error.clone(),
                        });
                    }
                    return Ok(value);
                }
            }
        }
    }

    /// Turns the fixture on or off with a smooth transition.
    pub fn set_power_state(&mut self, on: bool) -> Result<Value> {
        let state = if on { "on" } else { "off" };
        self.send(
            "set_power",
            vec![json!(state), json!("smooth"), json!(EFFECT_DURATION_MS)],
        )
    }

    /// Sets the fixture brightness (1-100) with a smooth transition.
    pub fn set_brightness(&mut self, level: u8) -> Result<Value> {
        self.send(
            "set_bright",
            vec![json!(level), json!("smooth"), json!(EFFECT_DURATION_MS)],
        )
    }

    /// Activates an effects mode (e.g. "direct" before streaming pixel
    /// updates).
    pub fn set_fx_mode(&mut self, mode: &str) -> Result<Value> {
        self.send("activate_fx_mode", vec![json!({"mode": mode})])
    }

    /// Transmits a pre-serialized pixel payload to the LED chain.
    pub fn draw_matrices(&mut self, rgb_data: &str) -> Result<Value> {
        self.send("update_leds", vec![json!(rgb_data)])
    }
}
