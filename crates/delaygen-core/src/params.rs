//! Delay parameters
//!
//! Defines the parameters understood by the delay generator firmware,
//! their validity constraints, and the conversion between physical
//! units (nanoseconds, counts) and device clock cycles.
//!
//! The generator runs its PIO state machines from a 200 MHz-derived
//! 5 ns tick, so every time-valued parameter is transmitted in clock
//! cycles and must be a multiple of 5 ns on the host side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::protocol::ProtocolError;

/// Duration of one device clock cycle in nanoseconds
pub const CLOCK_TICK_NS: i64 = 5;

/// A parameter of the delay generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Delay between trigger edge and output pulse, in ns ('o')
    Offset,

    /// Width of the output pulse, in ns ('l')
    Length,

    /// Gap between successive pulses of a burst, in ns ('s')
    Spacing,

    /// Number of extra pulses per trigger, as a raw count ('r')
    Repeats,
}

/// Validity constraints for a single parameter
///
/// `min` and `max` are inclusive and expressed in physical units
/// (nanoseconds for time parameters, raw count for repeats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Smallest accepted value
    pub min: i64,
    /// Largest accepted value
    pub max: i64,
    /// Physical units per device unit (5 for time parameters, 1 for counts)
    pub divisor: i64,
}

impl Parameter {
    /// All parameters, in canonical order
    pub const ALL: [Parameter; 4] = [
        Parameter::Offset,
        Parameter::Length,
        Parameter::Spacing,
        Parameter::Repeats,
    ];

    /// Get the single-letter wire code for this parameter
    pub fn code(&self) -> u8 {
        match self {
            Parameter::Offset => b'o',
            Parameter::Length => b'l',
            Parameter::Spacing => b's',
            Parameter::Repeats => b'r',
        }
    }

    /// Get the lowercase name used on the CLI and in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Offset => "offset",
            Parameter::Length => "length",
            Parameter::Spacing => "spacing",
            Parameter::Repeats => "repeats",
        }
    }

    /// Get the validity constraints for this parameter
    ///
    /// Ranges come from the width of the firmware counter backing each
    /// parameter: offset is a full 32-bit cycle counter, length 7 bits,
    /// spacing 20 bits, repeats 5 bits.
    pub fn spec(&self) -> ParamSpec {
        match self {
            Parameter::Offset => ParamSpec {
                min: 2 * CLOCK_TICK_NS,
                max: (u32::MAX as i64) * CLOCK_TICK_NS,
                divisor: CLOCK_TICK_NS,
            },
            Parameter::Length => ParamSpec {
                min: CLOCK_TICK_NS,
                max: ((1 << 7) - 1) * CLOCK_TICK_NS,
                divisor: CLOCK_TICK_NS,
            },
            Parameter::Spacing => ParamSpec {
                min: 36,
                max: ((1 << 20) - 1) * CLOCK_TICK_NS,
                divisor: CLOCK_TICK_NS,
            },
            Parameter::Repeats => ParamSpec {
                min: 0,
                max: 31,
                divisor: 1,
            },
        }
    }

    /// Validate a physical-unit value and convert it to device units
    ///
    /// The range check runs before the alignment check, and both run
    /// before the division, so the integer division is always exact.
    pub fn to_device_units(&self, value: i64) -> Result<u32, ProtocolError> {
        let spec = self.spec();
        if value < spec.min || value > spec.max {
            return Err(ProtocolError::OutOfRange {
                param: *self,
                value,
                min: spec.min,
                max: spec.max,
            });
        }
        if value % spec.divisor != 0 {
            return Err(ProtocolError::NotAligned {
                param: *self,
                value,
                divisor: spec.divisor,
            });
        }
        Ok((value / spec.divisor) as u32)
    }

    /// Convert a device-unit value back to physical units
    pub fn from_device_units(&self, raw: i64) -> i64 {
        raw * self.spec().divisor
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(Parameter::Offset),
            "length" => Ok(Parameter::Length),
            "spacing" => Ok(Parameter::Spacing),
            "repeats" => Ok(Parameter::Repeats),
            _ => Err(ProtocolError::InvalidParameter(s.to_string())),
        }
    }
}

/// Parse a `PARAM=VALUE` assignment as given on the CLI
///
/// The value is a decimal integer in physical units. Errors carry the
/// offending text so callers can report items individually.
pub fn parse_assignment(item: &str) -> Result<(Parameter, i64), ProtocolError> {
    let (key, value) = item
        .split_once('=')
        .ok_or_else(|| ProtocolError::MalformedAssignment(item.to_string()))?;
    let param = key.trim().parse::<Parameter>()?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ProtocolError::InvalidType {
            param: param.name().to_string(),
            value: value.trim().to_string(),
        })?;
    Ok((param, value))
}

/// An ordered batch of parameter values for a set operation
///
/// Values are in physical units. Insertion order is preserved in the
/// outgoing command; inserting an existing parameter replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(Parameter, i64)>,
}

impl ParameterSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter value
    pub fn insert(&mut self, param: Parameter, value: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == param) {
            entry.1 = value;
        } else {
            self.entries.push((param, value));
        }
    }

    /// Look up the value for a parameter
    pub fn get(&self, param: Parameter) -> Option<i64> {
        self.entries
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, v)| *v)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, i64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Parameter, i64)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (Parameter, i64)>>(iter: T) -> Self {
        let mut set = ParameterSet::new();
        for (param, value) in iter {
            set.insert(param, value);
        }
        set
    }
}
