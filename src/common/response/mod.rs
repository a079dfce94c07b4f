// src/common/response/mod.rs

mod convert;
mod error;

pub use convert::{convert_reply, FromReply, NumericKind, ReplyValue};
pub use error::{nak_description, ProtocolFault};
