// src/common/response/convert.rs

use alloc::string::String;
use core::str::FromStr;

use super::error::ProtocolFault;
/// Conversion a numeric or textual reply is put through.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NumericKind {
    /// Payload returned as-is.
    Text,
    Integer,
    Float,
}

/// Any value a client operation can hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyValue {
    /// Set commands and calibrations only confirm.
    Unit,
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Applies `kind` to a payload. A payload that does not parse is a
/// [`ProtocolFault::Conversion`], never a silently coerced value.
pub fn convert_reply(payload: &str, kind: NumericKind) -> Result<ReplyValue, ProtocolFault> {
    match kind {
        NumericKind::Text => String::from_reply(payload).map(ReplyValue::Text),
        NumericKind::Integer => i64::from_reply(payload).map(ReplyValue::Integer),
        NumericKind::Float => f64::from_reply(payload).map(ReplyValue::Float),
    }
}

/// Typed conversion from a reply payload.
pub trait FromReply: Sized {
    /// Name used in conversion errors.
    const EXPECTED: &'static str;

    fn from_reply(payload: &str) -> Result<Self, ProtocolFault>;
}

fn conversion<T: FromReply>() -> ProtocolFault {
    ProtocolFault::Conversion { expected: T::EXPECTED }
}

/// Acknowledgement only; the payload is not inspected.
impl FromReply for () {
    const EXPECTED: &'static str = "acknowledgement";

    fn from_reply(_payload: &str) -> Result<Self, ProtocolFault> {
        Ok(())
    }
}

impl FromReply for String {
    const EXPECTED: &'static str = "string";

    fn from_reply(payload: &str) -> Result<Self, ProtocolFault> {
        Ok(String::from(payload))
    }
}

macro_rules! from_reply_via_from_str {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl FromReply for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_reply(payload: &str) -> Result<Self, ProtocolFault> {
                    <$ty>::from_str(payload.trim()).map_err(|_| conversion::<$ty>())
                }
            }
        )*
    };
}

from_reply_via_from_str! {
    u32 => "unsigned integer",
    i64 => "integer",
}

/// `nan` and `inf` parse as floats but are never a reading.
impl FromReply for f64 {
    const EXPECTED: &'static str = "float";

    fn from_reply(payload: &str) -> Result<Self, ProtocolFault> {
        f64::from_str(payload.trim())
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(conversion::<f64>)
    }
}

impl FromReply for bool {
    const EXPECTED: &'static str = "ON/OFF flag";

    fn from_reply(payload: &str) -> Result<Self, ProtocolFault> {
        match payload.trim() {
            "ON" => Ok(true),
            "OFF" => Ok(false),
            _ => Err(conversion::<bool>()),
        }
    }
}
