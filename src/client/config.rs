// src/client/config.rs

use core::time::Duration;

use crate::common::{timing, DeviceAddr};

/// Per-client settings. Fixed for the lifetime of a [`PiraniClient`](super::PiraniClient).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address of the gauge on the bus.
    pub address: DeviceAddr,
    /// Upper bound on waiting for a complete reply.
    pub read_timeout: Duration,
    /// Upper bound on the interface accepting each byte and the final flush.
    pub write_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            address: DeviceAddr::DEFAULT_ADDRESS,
            read_timeout: timing::DEFAULT_READ_TIMEOUT,
            write_timeout: timing::DEFAULT_WRITE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_address(mut self, address: DeviceAddr) -> Self {
        self.address = address;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }
}
