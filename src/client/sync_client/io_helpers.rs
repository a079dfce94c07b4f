// src/client/sync_client/io_helpers.rs

use super::PiraniClient;
use crate::common::{
    error::PiraniError,
    frame,
    hal_traits::{PiraniSerial, PiraniTimer},
    response::ProtocolFault,
    timing,
};
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> PiraniClient<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        f: FN,
    ) -> Result<T, PiraniError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;
        self.execute_blocking_io_until(deadline, f)
    }

    /// Same as [`execute_blocking_io_with_timeout`](Self::execute_blocking_io_with_timeout)
    /// against an absolute deadline.
    pub(super) fn execute_blocking_io_until<FN, T>(
        &mut self,
        deadline: IF::Instant,
        mut f: FN,
    ) -> Result<T, PiraniError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(PiraniError::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(PiraniError::Io(e)),
            }
        }
    }

    /// Writes a rendered frame and flushes it onto the line.
    pub(super) fn send_frame_bytes(&mut self, frame_bytes: &[u8]) -> Result<(), PiraniError<IF::Error>> {
        let write_timeout = self.config.write_timeout;

        for byte in frame_bytes {
            self.execute_blocking_io_with_timeout(write_timeout, |iface| iface.write_byte(*byte))?;
        }

        self.execute_blocking_io_with_timeout(write_timeout, |iface| iface.flush())?;
        Ok(())
    }

    /// Reads until `;FF` arrives or the read timeout elapses.
    ///
    /// A timeout is not an error here: whatever arrived (possibly nothing) is
    /// returned and left for frame parsing to reject.
    pub(super) fn read_reply<'buf>(
        &mut self,
        buffer: &'buf mut [u8],
    ) -> Result<&'buf [u8], PiraniError<IF::Error>> {
        let deadline = self.interface.now() + self.config.read_timeout;

        let mut bytes_read = 0;
        loop {
            if bytes_read >= buffer.len() {
                return Err(ProtocolFault::BufferOverflow { capacity: buffer.len() }.into());
            }

            match self.execute_blocking_io_until(deadline, |iface| iface.read_byte()) {
                Ok(byte) => {
                    buffer[bytes_read] = byte;
                    bytes_read += 1;

                    if frame::ends_with_terminator(&buffer[..bytes_read]) {
                        return Ok(&buffer[..bytes_read]);
                    }
                }
                Err(PiraniError::Timeout) => {
                    tracing::warn!(bytes_read, "reply timed out");
                    return Ok(&buffer[..bytes_read]);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
