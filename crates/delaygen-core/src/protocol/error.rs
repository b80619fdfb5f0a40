//! Protocol errors

use thiserror::Error;

use crate::params::Parameter;

/// Errors that can occur during parameter validation or protocol
/// communication
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("invalid parameter: '{0}'")]
    InvalidParameter(String),

    #[error("value for '{param}' must be an integer, got '{value}'")]
    InvalidType { param: String, value: String },

    #[error("malformed assignment '{0}' (expected PARAM=VALUE)")]
    MalformedAssignment(String),

    #[error("value for '{param}'={value} is out of valid range [{min}, {max}]")]
    OutOfRange {
        param: Parameter,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("value for '{param}'={value} must be divisible by {divisor}")]
    NotAligned {
        param: Parameter,
        value: i64,
        divisor: i64,
    },

    #[error("device rejected command '{command}': '{response}'")]
    DeviceRejected { response: String, command: String },

    #[error("unexpected response '{0}' to a get command")]
    MalformedResponse(String),

    #[error("serial port error: {0}")]
    SerialError(String),

    #[error("response timeout")]
    Timeout,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
