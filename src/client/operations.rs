//! The 925 command set as a table.
//!
//! Each row names one remotely callable operation and says how its argument
//! is encoded and how its reply is read back. [`PiraniClient::invoke`] runs
//! any row; the typed client methods run a fixed row each.
//!
//! [`PiraniClient::invoke`]: super::PiraniClient::invoke

use crate::common::{
    command::{Access, Command, Mnemonic},
    error::ValueError,
    response::{convert_reply, FromReply, NumericKind, ProtocolFault, ReplyValue},
    types::{encode_scaled_value, enabled_token, GasType, SetpointDirection},
};

/// What an operation takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArgumentKind {
    None,
    /// Encoded with [`encode_scaled_value`].
    Pressure,
    Gas,
    Direction,
    Enabled,
}

impl ArgumentKind {
    pub const fn describe(&self) -> &'static str {
        match self {
            ArgumentKind::None => "no argument",
            ArgumentKind::Pressure => "a non-negative pressure",
            ArgumentKind::Gas => "a gas type",
            ArgumentKind::Direction => "ABOVE or BELOW",
            ArgumentKind::Enabled => "a boolean",
        }
    }
}

/// A caller-supplied argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Argument {
    None,
    Pressure(f64),
    Gas(GasType),
    Direction(SetpointDirection),
    Enabled(bool),
}

/// How an operation's reply payload is read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    /// Only the acknowledgement matters.
    Ack,
    Text,
    /// Text, lower-cased for callers.
    LowerText,
    Integer,
    Float,
    Flag,
}

impl ReplyKind {
    pub fn convert(&self, payload: &str) -> Result<ReplyValue, ProtocolFault> {
        match self {
            ReplyKind::Ack => Ok(ReplyValue::Unit),
            ReplyKind::Text => convert_reply(payload, NumericKind::Text),
            ReplyKind::Integer => convert_reply(payload, NumericKind::Integer),
            ReplyKind::Float => convert_reply(payload, NumericKind::Float),
            ReplyKind::LowerText => Ok(ReplyValue::Text(payload.to_lowercase())),
            ReplyKind::Flag => bool::from_reply(payload).map(ReplyValue::Flag),
        }
    }
}

/// One row of the command table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Name the operation is published under.
    pub name: &'static str,
    pub mnemonic: Mnemonic,
    pub access: Access,
    pub argument: ArgumentKind,
    pub reply: ReplyKind,
}

impl Operation {
    const fn query(name: &'static str, mnemonic: Mnemonic, reply: ReplyKind) -> Self {
        Operation { name, mnemonic, access: Access::Query, argument: ArgumentKind::None, reply }
    }

    const fn set(name: &'static str, mnemonic: Mnemonic, argument: ArgumentKind) -> Self {
        Operation { name, mnemonic, access: Access::Set, argument, reply: ReplyKind::Ack }
    }

    /// Encodes `argument` into the command for this row.
    pub fn build_command(&self, argument: &Argument) -> Result<Command, ValueError> {
        if self.access == Access::Query {
            return match argument {
                Argument::None => Ok(Command::query(self.mnemonic)),
                _ => Err(self.mismatch()),
            };
        }

        let command = match (self.argument, argument) {
            (ArgumentKind::None, Argument::None) => Command::set(self.mnemonic, "")?,
            (ArgumentKind::Pressure, Argument::Pressure(p)) => {
                Command::set(self.mnemonic, &encode_scaled_value(*p)?)?
            }
            (ArgumentKind::Gas, Argument::Gas(gas)) => Command::set(self.mnemonic, gas.token())?,
            (ArgumentKind::Direction, Argument::Direction(dir)) => {
                Command::set(self.mnemonic, dir.token())?
            }
            (ArgumentKind::Enabled, Argument::Enabled(on)) => {
                Command::set(self.mnemonic, enabled_token(*on))?
            }
            _ => return Err(self.mismatch()),
        };
        Ok(command)
    }

    fn mismatch(&self) -> ValueError {
        ValueError::ArgumentMismatch { operation: self.name, expected: self.argument.describe() }
    }
}

// --- The table ---

pub const GET_DEVICE_TYPE: Operation = Operation::query("getDeviceType", Mnemonic::DeviceType, ReplyKind::Text);
pub const GET_FIRMWARE_VERSION: Operation =
    Operation::query("getFirmwareVersion", Mnemonic::FirmwareVersion, ReplyKind::Text);
pub const GET_HARDWARE_VERSION: Operation =
    Operation::query("getHardwareVersion", Mnemonic::HardwareVersion, ReplyKind::Text);
pub const GET_MODEL_NUMBER: Operation = Operation::query("getModelNumber", Mnemonic::ModelNumber, ReplyKind::Text);
pub const GET_SERIAL_NUMBER: Operation =
    Operation::query("getSerialNumber", Mnemonic::SerialNumber, ReplyKind::Text);
/// Hours.
pub const GET_TIME_ON: Operation = Operation::query("getTimeOn", Mnemonic::TimeOn, ReplyKind::Integer);
/// Degrees C.
pub const GET_TRANSDUCER_TEMPERATURE: Operation =
    Operation::query("getTransducerTemperature", Mnemonic::TransducerTemperature, ReplyKind::Float);
pub const GET_PRESSURE: Operation = Operation::query("getPressure", Mnemonic::Pressure, ReplyKind::Float);
/// Lower-cased calibration name, not limited to the gases `setGasType` accepts.
pub const GET_GAS_TYPE: Operation =
    Operation::query("getGasType", Mnemonic::GasType, ReplyKind::LowerText);
pub const SET_GAS_TYPE: Operation = Operation::set("setGasType", Mnemonic::GasType, ArgumentKind::Gas);
pub const CALIBRATE_ATMOSPHERIC: Operation =
    Operation::set("calibrateAtmospheric", Mnemonic::AtmosphericCalibration, ArgumentKind::Pressure);
pub const CALIBRATE_VACUUM: Operation =
    Operation::set("calibrateVacuum", Mnemonic::VacuumCalibration, ArgumentKind::None);
pub const SET_SETPOINT: Operation = Operation::set("setSetpoint", Mnemonic::Setpoint, ArgumentKind::Pressure);
pub const GET_SETPOINT: Operation = Operation::query("getSetpoint", Mnemonic::Setpoint, ReplyKind::Float);
pub const SET_HYSTERESIS_VALUE: Operation =
    Operation::set("setHysteresisValue", Mnemonic::Hysteresis, ArgumentKind::Pressure);
pub const GET_HYSTERESIS_VALUE: Operation =
    Operation::query("getHysteresisValue", Mnemonic::Hysteresis, ReplyKind::Float);
pub const SET_SETPOINT_DIRECTION: Operation =
    Operation::set("setSetpointDirection", Mnemonic::SetpointDirection, ArgumentKind::Direction);
pub const GET_SETPOINT_DIRECTION: Operation =
    Operation::query("getSetpointDirection", Mnemonic::SetpointDirection, ReplyKind::Text);
pub const SET_SETPOINT_ENABLED: Operation =
    Operation::set("setSetpointEnabled", Mnemonic::SetpointEnable, ArgumentKind::Enabled);
pub const GET_SETPOINT_ENABLED: Operation =
    Operation::query("getSetpointEnabled", Mnemonic::SetpointEnable, ReplyKind::Flag);
pub const GET_SETPOINT_STATUS: Operation =
    Operation::query("getSetpointStatus", Mnemonic::SetpointStatus, ReplyKind::Text);

/// Every published operation.
pub static OPERATIONS: [Operation; 21] = [
    GET_DEVICE_TYPE,
    GET_FIRMWARE_VERSION,
    GET_HARDWARE_VERSION,
    GET_MODEL_NUMBER,
    GET_SERIAL_NUMBER,
    GET_TIME_ON,
    GET_TRANSDUCER_TEMPERATURE,
    GET_PRESSURE,
    GET_GAS_TYPE,
    SET_GAS_TYPE,
    CALIBRATE_ATMOSPHERIC,
    CALIBRATE_VACUUM,
    SET_SETPOINT,
    GET_SETPOINT,
    SET_HYSTERESIS_VALUE,
    GET_HYSTERESIS_VALUE,
    SET_SETPOINT_DIRECTION,
    GET_SETPOINT_DIRECTION,
    SET_SETPOINT_ENABLED,
    GET_SETPOINT_ENABLED,
    GET_SETPOINT_STATUS,
];

/// Looks up an operation by its published name.
pub fn find_operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_names_are_unique() {
        for (i, op) in OPERATIONS.iter().enumerate() {
            assert!(
                OPERATIONS[i + 1..].iter().all(|other| other.name != op.name),
                "duplicate operation {}",
                op.name
            );
        }
    }

    #[test]
    fn test_find_operation() {
        assert_eq!(find_operation("getPressure"), Some(&GET_PRESSURE));
        assert_eq!(find_operation("setGasType").map(|op| op.mnemonic), Some(Mnemonic::GasType));
        assert!(find_operation("getpressure").is_none());
        assert!(find_operation("selfDestruct").is_none());
    }

    #[test]
    fn test_query_commands() {
        let cmd = GET_TIME_ON.build_command(&Argument::None).unwrap();
        assert_eq!(cmd.to_string(), "TIM?");
        let cmd = GET_SETPOINT_STATUS.build_command(&Argument::None).unwrap();
        assert_eq!(cmd.to_string(), "SS1?");
    }

    #[test]
    fn test_set_commands() {
        let cmd = SET_GAS_TYPE.build_command(&Argument::Gas(GasType::Argon)).unwrap();
        assert_eq!(cmd.to_string(), "GT!ARGON");
        let cmd = CALIBRATE_ATMOSPHERIC.build_command(&Argument::Pressure(760.0)).unwrap();
        assert_eq!(cmd.to_string(), "ATM!7.60E+2");
        let cmd = CALIBRATE_VACUUM.build_command(&Argument::None).unwrap();
        assert_eq!(cmd.to_string(), "VAC!");
        let cmd = SET_HYSTERESIS_VALUE.build_command(&Argument::Pressure(0.0)).unwrap();
        assert_eq!(cmd.to_string(), "SH1!0");
        let cmd = SET_SETPOINT_DIRECTION.build_command(&Argument::Direction(SetpointDirection::Above)).unwrap();
        assert_eq!(cmd.to_string(), "SD1!ABOVE");
        let cmd = SET_SETPOINT_ENABLED.build_command(&Argument::Enabled(false)).unwrap();
        assert_eq!(cmd.to_string(), "EN1!OFF");
    }

    #[test]
    fn test_argument_mismatch() {
        assert_eq!(
            SET_SETPOINT.build_command(&Argument::None),
            Err(ValueError::ArgumentMismatch { operation: "setSetpoint", expected: "a non-negative pressure" })
        );
        assert!(GET_PRESSURE.build_command(&Argument::Pressure(1.0)).is_err());
        assert_eq!(SET_SETPOINT.build_command(&Argument::Pressure(-2.0)), Err(ValueError::Negative(-2.0)));
    }

    #[test]
    fn test_reply_kinds() {
        assert_eq!(ReplyKind::Ack.convert("anything"), Ok(ReplyValue::Unit));
        assert_eq!(ReplyKind::Integer.convert("42"), Ok(ReplyValue::Integer(42)));
        assert_eq!(ReplyKind::LowerText.convert("HELIUM"), Ok(ReplyValue::Text("helium".to_string())));
        assert_eq!(ReplyKind::LowerText.convert("NEON"), Ok(ReplyValue::Text("neon".to_string())));
        assert_eq!(ReplyKind::Text.convert("ABOVE"), Ok(ReplyValue::Text("ABOVE".to_string())));
        assert_eq!(ReplyKind::Flag.convert("ON"), Ok(ReplyValue::Flag(true)));
        assert!(ReplyKind::Flag.convert("MAYBE").is_err());
    }
}
