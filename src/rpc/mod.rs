//! Method dispatch for an RPC server.
//!
//! Maps a method name and its params onto the command table and turns the
//! result into a JSON value. Message envelopes, transports and sessions are
//! left to the server embedding the [`Dispatcher`].

mod params;

use alloc::string::{String, ToString};
use serde_json::{Number, Value};

use crate::client::{operations, PiraniClient};
use crate::common::{
    error::{ErrorKind, PiraniError},
    hal_traits::{PiraniSerial, PiraniTimer},
    response::ReplyValue,
};

pub use params::{decode_argument, param_name};

/// Why a call did not produce a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CallError {
    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: &'static str, reason: String },

    /// The call reached the gauge (or tried to) and failed.
    #[error("{message}")]
    Device { kind: ErrorKind, message: String },
}

impl CallError {
    /// JSON-RPC 2.0 error code for this failure.
    pub fn code(&self) -> i64 {
        match self {
            CallError::MethodNotFound(_) => -32601,
            CallError::InvalidParams { .. } => -32602,
            CallError::Device { .. } => -32000,
        }
    }
}

/// Routes calls by name to one gauge client.
///
/// `call` takes `&mut self`: a server with several workers must put the
/// dispatcher behind a lock so only one transaction is on the bus at a time.
#[derive(Debug)]
pub struct Dispatcher<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    client: PiraniClient<IF>,
}

impl<IF> Dispatcher<IF>
where
    IF: PiraniSerial + PiraniTimer,
{
    pub fn new(client: PiraniClient<IF>) -> Self {
        Dispatcher { client }
    }

    pub fn client_mut(&mut self) -> &mut PiraniClient<IF> {
        &mut self.client
    }

    pub fn into_inner(self) -> PiraniClient<IF> {
        self.client
    }

    /// Names of every method this dispatcher answers.
    pub fn method_names() -> impl Iterator<Item = &'static str> {
        operations::OPERATIONS.iter().map(|op| op.name)
    }

    /// Executes `method` with `params` (`null`, a positional array or a keyword object).
    pub fn call(&mut self, method: &str, params: &Value) -> Result<Value, CallError> {
        let operation = operations::find_operation(method)
            .ok_or_else(|| CallError::MethodNotFound(String::from(method)))?;

        let argument = decode_argument(operation, params).map_err(|reason| CallError::InvalidParams {
            method: operation.name,
            reason,
        })?;

        tracing::debug!(method = operation.name, ?argument, "dispatching call");

        match self.client.invoke(operation, argument) {
            Ok(value) => Ok(to_json(value)),
            Err(PiraniError::Value(e)) => Err(CallError::InvalidParams {
                method: operation.name,
                reason: e.to_string(),
            }),
            Err(e) => {
                tracing::warn!(method = operation.name, error = %e, "call failed");
                Err(CallError::Device { kind: e.kind(), message: e.to_string() })
            }
        }
    }
}

/// Renders a reply as the JSON a caller receives.
pub fn to_json(value: ReplyValue) -> Value {
    match value {
        ReplyValue::Unit => Value::Null,
        ReplyValue::Text(text) => Value::String(text),
        ReplyValue::Integer(i) => Value::Number(i.into()),
        ReplyValue::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ReplyValue::Flag(b) => Value::Bool(b),
    }
}
