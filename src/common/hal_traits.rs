// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Abstraction for the monotonic clock and delays the client needs to bound
/// every transaction in time.
pub trait PiraniTimer {
    /// Point in time returned by [`now`](PiraniTimer::now).
    type Instant: PiraniInstant;

    /// Current time of a monotonic clock.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);
}

/// What the client needs from an instant: ordering and arithmetic with `Duration`.
pub trait PiraniInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> PiraniInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for non-blocking byte-wise serial communication with the gauge.
pub trait PiraniSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Drops any bytes already waiting in the receive buffer.
    ///
    /// Called before each command so a late reply to an earlier, timed-out
    /// command is not taken as the answer to this one. The default does nothing.
    fn discard_input(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
