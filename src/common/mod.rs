// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod response;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::DeviceAddr;

// From command.rs
pub use command::{Access, Command, CommandFormatError, Mnemonic};

// From error.rs
pub use error::{DeviceError, ErrorKind, PiraniError, ValueError};

// From frame.rs
pub use frame::{build_command_frame, parse_reply_frame, CommandFrame};

// From hal_traits.rs
pub use hal_traits::{PiraniInstant, PiraniSerial, PiraniTimer};

// From response/ (and its sub-modules via its own `pub use`)
pub use response::{convert_reply, FromReply, NumericKind, ProtocolFault, ReplyValue};

// From types.rs
pub use types::{encode_scaled_value, GasType, SetpointDirection};
