// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)] // no_std unless the std feature is on

// Replies are owned strings, so alloc is always needed.
extern crate alloc;

pub mod client;
pub mod common;

#[cfg(feature = "rpc")]
pub mod rpc;

#[cfg(feature = "serial")]
pub mod serial;

// Re-export key types for convenience
pub use client::{ClientConfig, PiraniClient};
pub use common::{DeviceAddr, PiraniError};
