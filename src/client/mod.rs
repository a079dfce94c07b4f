// src/client/mod.rs

pub mod config;
pub mod operations;
pub mod sync_client;

pub use config::ClientConfig;
pub use operations::{find_operation, Argument, ArgumentKind, Operation, ReplyKind, OPERATIONS};
pub use sync_client::PiraniClient;
