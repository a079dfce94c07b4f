// src/serial.rs
//
// Binds the transport traits to a real serial port through the serialport crate.
// Port names are passed through verbatim; discovery is left to the launcher.

use std::io::{self, Read, Write};
use std::string::String;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serialport::{ClearBuffer, DataBits, Parity as SpParity, SerialPort, StopBits};

use crate::common::{
    hal_traits::{PiraniSerial, PiraniTimer},
    timing,
};

// ============================================================================
// Settings
// ============================================================================

/// Parity setting for serial port configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// Convert our Parity enum to serialport crate's Parity type
pub fn to_serialport_parity(p: Parity) -> SpParity {
    match p {
        Parity::None => SpParity::None,
        Parity::Odd => SpParity::Odd,
        Parity::Even => SpParity::Even,
    }
}

/// Line settings for the gauge. The 925 ships at 9600 8N1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    /// OS port name, e.g. `/dev/ttyUSB0` or `COM6`.
    pub port: String,
    pub baud_rate: u32,
    pub parity: Parity,
    /// How long a single read call may block before reporting no data.
    pub poll_timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        SerialSettings {
            port: String::new(),
            baud_rate: timing::DEFAULT_BAUD_RATE,
            parity: Parity::None,
            poll_timeout_ms: 1,
        }
    }
}

// ============================================================================
// Interface
// ============================================================================

/// A serial port driven byte by byte for [`PiraniClient`](crate::PiraniClient).
pub struct SerialInterface {
    port: Box<dyn SerialPort>,
}

impl core::fmt::Debug for SerialInterface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialInterface")
            .field("port", &self.port.name())
            .finish()
    }
}

impl SerialInterface {
    pub fn open(settings: &SerialSettings) -> Result<Self, serialport::Error> {
        let port = serialport::new(&settings.port, settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(to_serialport_parity(settings.parity))
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(settings.poll_timeout_ms))
            .open()?;

        tracing::info!(port = %settings.port, baud_rate = settings.baud_rate, "opened serial port");
        Ok(Self::from_port(port))
    }

    /// Wraps an already opened port.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        SerialInterface { port }
    }

    pub fn into_port(self) -> Box<dyn SerialPort> {
        self.port
    }
}

fn would_block(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted)
}

impl PiraniSerial for SerialInterface {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => Ok(buf[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if would_block(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self.port.write(&[byte]) {
            Ok(1) => Ok(()),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if would_block(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        match self.port.flush() {
            Ok(()) => Ok(()),
            Err(e) if would_block(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn discard_input(&mut self) -> Result<(), Self::Error> {
        self.port.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}

impl PiraniTimer for SerialInterface {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

// ============================================================================
// Tests
// ============================================================================
