// src/common/error.rs

use super::response::ProtocolFault;

/// Caller supplied an argument the gauge cannot accept. Raised before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("value must not be negative, got {0}")]
    Negative(f64),

    #[error("value must be finite")]
    NonFinite,

    #[error("address {0} does not fit the three digit address field")]
    InvalidAddress(u16),

    #[error("unknown gas type (expected air, argon, nitrogen, h2o, hydrogen or helium)")]
    UnknownGasType,

    #[error("unknown setpoint direction (expected ABOVE or BELOW)")]
    UnknownDirection,

    /// The rendered command does not fit the outbound frame buffer.
    #[error("command frame too long: needed {needed}, capacity {capacity}")]
    FrameTooLong { needed: usize, capacity: usize },

    /// Operation was invoked with the wrong kind of argument.
    #[error("operation `{operation}` expects {expected}")]
    ArgumentMismatch {
        operation: &'static str,
        expected: &'static str,
    },
}

/// Every failure a client operation can report.
///
/// `E` is the error type of the serial interface.
#[derive(Debug, thiserror::Error)]
pub enum PiraniError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial interface.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The interface would not accept or flush the command in time.
    #[error("Operation timed out")]
    Timeout,

    #[error("invalid argument: {0}")]
    Value(#[from] ValueError),

    #[error("protocol fault: {0}")]
    Protocol(#[from] ProtocolFault),
}

/// Three-way classification of a [`PiraniError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally, nothing was sent.
    Value,
    /// Reply missing, malformed, rejected by the gauge, or unparseable.
    Protocol,
    /// The serial primitive itself failed.
    Transport,
}

impl<E: core::fmt::Debug> PiraniError<E> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PiraniError::Value(_) => ErrorKind::Value,
            PiraniError::Protocol(_) => ErrorKind::Protocol,
            PiraniError::Io(_) | PiraniError::Timeout => ErrorKind::Transport,
        }
    }

    /// Discards the detail and collapses into the single opaque fault older
    /// callers expect.
    pub fn flatten(self) -> DeviceError {
        DeviceError
    }
}

/// Opaque fault kept for callers that only ever matched on one error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("The device threw an error")]
pub struct DeviceError;

impl<E: core::fmt::Debug> From<PiraniError<E>> for DeviceError {
    fn from(e: PiraniError<E>) -> Self {
        e.flatten()
    }
}
