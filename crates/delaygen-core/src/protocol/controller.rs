//! Connection management
//!
//! Owns the connection to the generator and executes set/get commands
//! against it.

use std::io::{Read, Write};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{
    serial::open_port,
    stream::{CommandStream, SerialStream},
    ProtocolError, DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT_MS,
};
use crate::params::{Parameter, ParameterSet};

/// Timeout for individual stream reads; the overall response deadline
/// is enforced by the controller's read loop
const READ_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Connection configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Serial port name
    pub port_name: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Response timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Connection to a delay generator
///
/// The controller takes ownership of the underlying stream for its
/// whole lifetime. One command is in flight at a time; callers needing
/// concurrent access must serialize externally. Dropping the controller
/// releases the port on every exit path.
pub struct DelayController {
    stream: Box<dyn CommandStream>,
    config: ControllerConfig,
}

impl DelayController {
    /// Open the configured serial port and take ownership of it
    pub fn open(config: ControllerConfig) -> Result<Self, ProtocolError> {
        let port = open_port(&config.port_name, Some(config.baud_rate))?;
        let mut stream = Box::new(SerialStream::new(port));
        stream.set_timeout(READ_POLL_TIMEOUT)?;
        stream.clear_input_buffer()?;
        Ok(Self { stream, config })
    }

    /// Build a controller over an arbitrary stream (tests, TCP bridges)
    pub fn with_stream(stream: Box<dyn CommandStream>, config: ControllerConfig) -> Self {
        Self { stream, config }
    }

    /// Set a batch of parameters, values in physical units
    ///
    /// The whole batch is validated and converted before any byte is
    /// written, so a failing entry means nothing reaches the device.
    /// Entries are transmitted in insertion order.
    pub fn set_parameters(&mut self, params: &ParameterSet) -> Result<(), ProtocolError> {
        let mut command = String::from("S ");
        for (param, value) in params.iter() {
            let device_value = param.to_device_units(value)?;
            command.push_str(&format!("{} {} ", param.code() as char, device_value));
        }

        self.send_line(&command)?;
        let response = self.read_line()?;
        if response != "OK" {
            return Err(ProtocolError::DeviceRejected { response, command });
        }
        Ok(())
    }

    /// Read one parameter back, returned in physical units
    pub fn get_parameter(&mut self, param: Parameter) -> Result<i64, ProtocolError> {
        let command = format!("G {}", param.code() as char);
        self.send_line(&command)?;
        let response = self.read_line()?;
        let raw: i64 = response
            .parse()
            .map_err(|_| ProtocolError::MalformedResponse(response))?;
        Ok(param.from_device_units(raw))
    }

    /// Release the connection explicitly
    ///
    /// Equivalent to dropping the controller; provided so teardown can
    /// be spelled out at the end of a session scope.
    pub fn close(self) {}

    /// Transmit one newline-terminated command line
    fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.stream.clear_input_buffer()?;
        debug!("send {:?}", line);
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\n")?;
        self.stream.flush()?;
        Ok(())
    }

    /// Read one response line, tolerating CRLF, within the configured
    /// deadline
    fn read_line(&mut self) -> Result<String, ProtocolError> {
        let deadline = Instant::now() + Duration::from_millis(self.config.timeout_ms);
        let mut line: Vec<u8> = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match self.stream.read(&mut byte) {
                // EOF: the device went away; accept what arrived so far
                Ok(0) => {
                    if line.is_empty() {
                        return Err(ProtocolError::Timeout);
                    }
                    break;
                }
                Ok(_) => match byte[0] {
                    b'\n' => break,
                    b'\r' => {}
                    b => line.push(b),
                },
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::TimedOut
                        || e.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(ProtocolError::IoError(e)),
            }

            if Instant::now() >= deadline {
                warn!(
                    "no complete response within {}ms ({} bytes so far)",
                    self.config.timeout_ms,
                    line.len()
                );
                return Err(ProtocolError::Timeout);
            }
        }

        let text = String::from_utf8_lossy(&line).trim().to_string();
        debug!("recv {:?}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_config_default() {
        let config = ControllerConfig::default();
        assert_eq!(config.port_name, DEFAULT_PORT);
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
