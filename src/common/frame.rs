// src/common/frame.rs

use core::fmt::Write;
use core::str;

use arrayvec::ArrayString;

use super::address::DeviceAddr;
use super::command::CommandFormatError;
use super::response::ProtocolFault;

/// Every frame, in both directions, starts with this.
pub const FRAME_START: u8 = b'@';
/// Every frame, in both directions, ends with this.
pub const FRAME_TERMINATOR: &[u8] = b";FF";
/// Largest outbound frame: `@999` + command + `;FF`.
pub const FRAME_CAPACITY: usize = 32;

/// A fully rendered outbound frame.
pub type CommandFrame = ArrayString<FRAME_CAPACITY>;

// Longest reply prefix: "@999ACK".
type Prefix = ArrayString<8>;

/// Renders `@<address><command>;FF`.
///
/// The command text is not escaped; it must not contain `;FF` itself.
pub fn build_command_frame(address: DeviceAddr, command: &str) -> Result<CommandFrame, CommandFormatError> {
    let mut frame = CommandFrame::new();
    write!(frame, "@{}{};FF", address, command).map_err(|_| CommandFormatError::BufferOverflow {
        needed: 1 + digits(address) + command.len() + FRAME_TERMINATOR.len(),
        capacity: FRAME_CAPACITY,
    })?;
    Ok(frame)
}

/// Extracts the payload of `@<address>ACK<payload>;FF` from a raw reply.
///
/// Bytes before the frame are ignored. The payload runs to the last `;FF`
/// on the same line. A `@<address>NAK<code>;FF` frame is reported as
/// [`ProtocolFault::Rejected`]; anything else that does not match is
/// [`ProtocolFault::MalformedFrame`].
pub fn parse_reply_frame(address: DeviceAddr, raw: &[u8]) -> Result<&str, ProtocolFault> {
    if raw.is_empty() {
        return Err(ProtocolFault::NoReply);
    }

    let ack = reply_prefix(address, "ACK")?;
    if let Some(start) = find(raw, ack.as_bytes()) {
        let body = line(&raw[start + ack.len()..]);
        let end = rfind(body, FRAME_TERMINATOR).ok_or(ProtocolFault::MalformedFrame)?;
        return str::from_utf8(&body[..end]).map_err(|_| ProtocolFault::MalformedFrame);
    }

    let nak = reply_prefix(address, "NAK")?;
    if let Some(start) = find(raw, nak.as_bytes()) {
        let body = line(&raw[start + nak.len()..]);
        let end = find(body, FRAME_TERMINATOR).ok_or(ProtocolFault::MalformedFrame)?;
        let code = str::from_utf8(&body[..end])
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok())
            .ok_or(ProtocolFault::MalformedFrame)?;
        return Err(ProtocolFault::Rejected { code });
    }

    Err(ProtocolFault::MalformedFrame)
}

/// True once `buffer` holds a complete frame.
#[inline]
pub fn ends_with_terminator(buffer: &[u8]) -> bool {
    buffer.ends_with(FRAME_TERMINATOR)
}

// --- Internal Helpers ---

fn reply_prefix(address: DeviceAddr, kind: &str) -> Result<Prefix, ProtocolFault> {
    let mut prefix = Prefix::new();
    write!(prefix, "@{}{}", address, kind).map_err(|_| ProtocolFault::MalformedFrame)?;
    Ok(prefix)
}

fn digits(address: DeviceAddr) -> usize {
    match address.as_u16() {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

/// Cuts at the first line feed; a frame never spans lines.
fn line(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(idx) => &bytes[..idx],
        None => bytes,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
