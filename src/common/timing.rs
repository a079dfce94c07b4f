// src/common/timing.rs

use core::time::Duration;

/// How long to wait for a reply to complete.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// How long the interface may refuse a byte or a flush before the command is abandoned.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(50);

/// Pause between polls of a `WouldBlock` primitive.
pub const POLL_INTERVAL_US: u32 = 100;

/// Factory default line speed.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Fixed receive buffer size. The longest documented reply is well under this.
pub const REPLY_BUFFER_SIZE: usize = 64;
