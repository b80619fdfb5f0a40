//! Serial Protocol Communication
//!
//! Implements the line-oriented ASCII set/get protocol spoken by the
//! delay generator firmware.
//!
//! Commands and responses are newline-terminated; all values on the
//! wire are device clock cycles, never nanoseconds.

mod controller;
mod error;
pub mod serial;
mod stream;

pub use controller::{ControllerConfig, DelayController};
pub use error::ProtocolError;
pub use serial::{list_ports, open_port, PortInfo};
pub use stream::{CommandStream, SerialStream};

/// Default baud rate for generator communication
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Default timeout for responses in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default serial device of a Pico exposing USB CDC
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
