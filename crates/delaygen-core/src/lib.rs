//! # DelayGen Core Library
//!
//! Core functionality for the DelayGen delay generator control software.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The delay parameter model (offset, length, spacing, repeats) with
//!   range and alignment validation
//! - Nanosecond ↔ clock-cycle unit conversion (5 ns per tick)
//! - The ASCII set/get serial protocol spoken by the generator firmware
//! - Serial port enumeration and connection management
//!
//! ## Supported hardware
//!
//! - Raspberry Pi Pico (RP2040) trigger sweeper firmware
//! - Any device speaking the same line-oriented `S`/`G` protocol
//!
//! ## Example
//!
//! ```rust,ignore
//! use delaygen_core::params::{Parameter, ParameterSet};
//! use delaygen_core::protocol::{ControllerConfig, DelayController};
//!
//! let config = ControllerConfig {
//!     port_name: "/dev/ttyACM0".to_string(),
//!     ..Default::default()
//! };
//! let mut dc = DelayController::open(config)?;
//!
//! let mut params = ParameterSet::new();
//! params.insert(Parameter::Offset, 100);
//! params.insert(Parameter::Repeats, 3);
//! dc.set_parameters(&params)?;
//!
//! let offset_ns = dc.get_parameter(Parameter::Offset)?;
//! println!("offset: {} ns", offset_ns);
//! ```

pub mod params;
pub mod protocol;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::params::{ParamSpec, Parameter, ParameterSet};
    pub use crate::protocol::{ControllerConfig, DelayController, ProtocolError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
