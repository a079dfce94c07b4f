//! Command definitions for the 925 ASCII protocol.
//!
//! A command on the wire is `<MNEMONIC><?|!>[payload]`. The address prefix and
//! the `;FF` terminator are added by [`build_command_frame`](super::frame::build_command_frame).

use core::fmt::{self, Write};

use arrayvec::ArrayString;

use super::error::ValueError;

/// Longest payload any 925 set command carries (`NITROGEN`, `HYDROGEN`, `1.00E-5`).
pub const PAYLOAD_CAPACITY: usize = 16;
/// Room for mnemonic, access character and payload.
pub const COMMAND_CAPACITY: usize = 24;

/// Every command mnemonic the client issues.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    DeviceType,
    FirmwareVersion,
    HardwareVersion,
    ModelNumber,
    SerialNumber,
    TimeOn,
    TransducerTemperature,
    Pressure,
    GasType,
    AtmosphericCalibration,
    VacuumCalibration,
    Setpoint,
    Hysteresis,
    SetpointDirection,
    SetpointEnable,
    SetpointStatus,
}

impl Mnemonic {
    /// The code sent on the wire.
    pub const fn code(&self) -> &'static str {
        match self {
            Mnemonic::DeviceType => "DT",
            Mnemonic::FirmwareVersion => "FV",
            Mnemonic::HardwareVersion => "HV",
            Mnemonic::ModelNumber => "MD",
            Mnemonic::SerialNumber => "SN",
            Mnemonic::TimeOn => "TIM",
            Mnemonic::TransducerTemperature => "TEM",
            Mnemonic::Pressure => "PR1",
            Mnemonic::GasType => "GT",
            Mnemonic::AtmosphericCalibration => "ATM",
            Mnemonic::VacuumCalibration => "VAC",
            Mnemonic::Setpoint => "SP1",
            Mnemonic::Hysteresis => "SH1",
            Mnemonic::SetpointDirection => "SD1",
            Mnemonic::SetpointEnable => "EN1",
            Mnemonic::SetpointStatus => "SS1",
        }
    }
}

/// Query (`?`) reads a value, Set (`!`) writes one or triggers an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    Query,
    Set,
}

impl Access {
    pub const fn as_char(&self) -> char {
        match self {
            Access::Query => '?',
            Access::Set => '!',
        }
    }
}

/// Error raised when a command or frame does not fit its fixed buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandFormatError {
    #[error("buffer overflow: needed {needed}, capacity {capacity}")]
    BufferOverflow { needed: usize, capacity: usize },
}

impl From<CommandFormatError> for ValueError {
    fn from(e: CommandFormatError) -> Self {
        match e {
            CommandFormatError::BufferOverflow { needed, capacity } => {
                ValueError::FrameTooLong { needed, capacity }
            }
        }
    }
}

/// One request to the gauge, built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    mnemonic: Mnemonic,
    access: Access,
    payload: ArrayString<PAYLOAD_CAPACITY>,
}

impl Command {
    pub fn query(mnemonic: Mnemonic) -> Self {
        Command {
            mnemonic,
            access: Access::Query,
            payload: ArrayString::new(),
        }
    }

    /// A set command. An empty payload is valid (`VAC!`).
    pub fn set(mnemonic: Mnemonic, payload: &str) -> Result<Self, CommandFormatError> {
        let payload = ArrayString::from(payload).map_err(|_| CommandFormatError::BufferOverflow {
            needed: payload.len(),
            capacity: PAYLOAD_CAPACITY,
        })?;
        Ok(Command {
            mnemonic,
            access: Access::Set,
            payload,
        })
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Renders the command text (without address or terminator).
    pub fn format_into(&self) -> Result<ArrayString<COMMAND_CAPACITY>, CommandFormatError> {
        let mut buffer = ArrayString::new();
        write!(buffer, "{}", self).map_err(|_| CommandFormatError::BufferOverflow {
            needed: self.mnemonic.code().len() + 1 + self.payload.len(),
            capacity: COMMAND_CAPACITY,
        })?;
        Ok(buffer)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.mnemonic.code(), self.access.as_char(), self.payload)
    }
}
