// src/common/response/error.rs

/// A reply that could not be turned into a value.
///
/// The gauge does not separate these at the frame level; the client does, so
/// callers can tell a silent gauge from a garbled or refused command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ProtocolFault {
    /// Nothing arrived before the read timeout.
    #[error("no reply before the read timeout")]
    NoReply,

    /// Bytes arrived but they do not form `@<addr>ACK<payload>;FF`.
    #[error("reply does not match @<addr>ACK<payload>;FF")]
    MalformedFrame,

    /// The gauge answered with `@<addr>NAK<code>;FF`.
    #[error("device rejected the command with NAK{code} ({})", nak_description(.code))]
    Rejected { code: u16 },

    /// Reply did not fit the receive buffer.
    #[error("reply exceeded the {capacity} byte receive buffer")]
    BufferOverflow { capacity: usize },

    /// The payload could not be read as the expected type.
    #[error("reply payload is not a valid {expected}")]
    Conversion { expected: &'static str },
}

/// Human readable text for the NAK codes the 925 is documented to send.
pub fn nak_description(code: &u16) -> &'static str {
    match code {
        8 => "zero adjustment at too high pressure",
        9 => "atmospheric adjustment at too low pressure",
        160 => "unrecognized message",
        169 => "invalid argument",
        172 => "value out of range",
        175 => "command/query character invalid",
        180 => "not in setup mode",
        _ => "unknown error code",
    }
}
