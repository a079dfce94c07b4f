// src/client/sync_client/transaction.rs

use super::PiraniClient;
use crate::client::operations::{Argument, Operation};
use crate::common::{
    command::Command,
    error::{PiraniError, ValueError},
    frame,
    hal_traits::{PiraniSerial, PiraniTimer},
    response::{FromReply, ProtocolFault, ReplyValue},
    timing,
};

impl<IF> PiraniClient<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    /// Executes one command/reply round trip and returns the reply payload.
    ///
    /// No retries: a missing or malformed reply is returned to the caller as is.
    pub(super) fn execute_transaction<'buf>(
        &mut self,
        command: &Command,
        read_buffer: &'buf mut [u8],
    ) -> Result<&'buf str, PiraniError<IF::Error>> {
        let address = self.config.address;

        // 1. Format command
        let text = command.format_into().map_err(ValueError::from)?;
        let frame = frame::build_command_frame(address, &text).map_err(ValueError::from)?;

        // 2. Drop stale input, send, flush
        self.interface.discard_input().map_err(PiraniError::Io)?;
        tracing::debug!(frame = frame.as_str(), "sending command");
        self.send_frame_bytes(frame.as_bytes())?;

        // 3. Read until terminator or timeout
        let reply = self.read_reply(read_buffer)?;
        tracing::trace!(raw = ?reply, "reply bytes");

        // 4. Validate frame
        match frame::parse_reply_frame(address, reply) {
            Ok(payload) => {
                tracing::debug!(payload, "reply payload");
                Ok(payload)
            }
            Err(fault @ ProtocolFault::Rejected { .. }) => {
                tracing::warn!(command = text.as_str(), %fault, "command rejected");
                Err(fault.into())
            }
            Err(fault) => {
                tracing::warn!(command = text.as_str(), %fault, "bad reply");
                Err(fault.into())
            }
        }
    }

    /// Runs `operation` and converts the payload to `T`.
    pub(super) fn call<T: FromReply>(
        &mut self,
        operation: &Operation,
        argument: Argument,
    ) -> Result<T, PiraniError<IF::Error>> {
        let command = operation.build_command(&argument)?;
        let mut read_buffer = [0u8; timing::REPLY_BUFFER_SIZE];
        let payload = self.execute_transaction(&command, &mut read_buffer)?;
        Ok(T::from_reply(payload)?)
    }

    /// Runs any row of the command table, converting the reply as the row says.
    pub fn invoke(
        &mut self,
        operation: &Operation,
        argument: Argument,
    ) -> Result<ReplyValue, PiraniError<IF::Error>> {
        let command = operation.build_command(&argument)?;
        let mut read_buffer = [0u8; timing::REPLY_BUFFER_SIZE];
        let payload = self.execute_transaction(&command, &mut read_buffer)?;
        Ok(operation.reply.convert(payload)?)
    }
}
