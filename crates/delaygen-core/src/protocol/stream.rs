//! Transport abstraction
//!
//! The controller talks to the generator through a [`CommandStream`],
//! an opaque bidirectional byte stream. Production code wraps a serial
//! port; tests substitute in-memory mocks at this seam.

use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;

/// Byte stream carrying protocol traffic to and from the generator
pub trait CommandStream: Read + Write + Send {
    /// Set the timeout applied to individual read calls
    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()>;

    /// Discard any unread input (stale responses, boot chatter)
    fn clear_input_buffer(&mut self) -> io::Result<()>;
}

/// Serial port wrapper implementing [`CommandStream`]
pub struct SerialStream {
    port: Box<dyn SerialPort>,
}

impl SerialStream {
    /// Wrap an already-open serial port
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }
}

impl Read for SerialStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl CommandStream for SerialStream {
    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn clear_input_buffer(&mut self) -> io::Result<()> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
