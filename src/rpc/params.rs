// src/rpc/params.rs

use alloc::format;
use alloc::string::String;
use serde_json::{Map, Value};

use crate::client::operations::{Argument, ArgumentKind, Operation};
use crate::common::types::{GasType, SetpointDirection};

/// Keyword under which each argument kind is accepted.
pub fn param_name(kind: ArgumentKind) -> Option<&'static str> {
    match kind {
        ArgumentKind::None => None,
        ArgumentKind::Pressure => Some("pressure"),
        ArgumentKind::Gas => Some("gasType"),
        ArgumentKind::Direction => Some("direction"),
        ArgumentKind::Enabled => Some("enabled"),
    }
}

/// Decodes positional (`[x]`) or keyword (`{"name": x}`) params for `operation`.
///
/// Omitted gas type, direction and enable flag fall back to air, BELOW and
/// off. A pressure is always required.
pub fn decode_argument(operation: &Operation, params: &Value) -> Result<Argument, String> {
    let name = param_name(operation.argument);
    let raw = match params {
        Value::Null => None,
        Value::Array(items) => positional(items)?,
        Value::Object(map) => keyword(map, name)?,
        _ => return Err(String::from("params must be an array or an object")),
    };

    match (operation.argument, raw) {
        (ArgumentKind::None, None) => Ok(Argument::None),
        (ArgumentKind::None, Some(_)) => Err(String::from("takes no arguments")),

        (ArgumentKind::Pressure, Some(v)) => v
            .as_f64()
            .map(Argument::Pressure)
            .ok_or_else(|| String::from("pressure must be a number")),
        (ArgumentKind::Pressure, None) => Err(String::from("missing argument `pressure`")),

        (ArgumentKind::Gas, None) => Ok(Argument::Gas(GasType::default())),
        (ArgumentKind::Gas, Some(v)) => {
            let text = v.as_str().ok_or_else(|| String::from("gasType must be a string"))?;
            text.parse().map(Argument::Gas).map_err(|e| format!("{}", e))
        }

        (ArgumentKind::Direction, None) => Ok(Argument::Direction(SetpointDirection::default())),
        (ArgumentKind::Direction, Some(v)) => {
            let text = v.as_str().ok_or_else(|| String::from("direction must be a string"))?;
            text.parse().map(Argument::Direction).map_err(|e| format!("{}", e))
        }

        (ArgumentKind::Enabled, None) => Ok(Argument::Enabled(false)),
        (ArgumentKind::Enabled, Some(v)) => v
            .as_bool()
            .map(Argument::Enabled)
            .ok_or_else(|| String::from("enabled must be a boolean")),
    }
}

fn positional(items: &[Value]) -> Result<Option<&Value>, String> {
    match items {
        [] => Ok(None),
        [single] => Ok(Some(single)),
        _ => Err(format!("expected at most one argument, got {}", items.len())),
    }
}

fn keyword<'a>(map: &'a Map<String, Value>, name: Option<&str>) -> Result<Option<&'a Value>, String> {
    if let Some(unexpected) = map.keys().find(|key| Some(key.as_str()) != name) {
        return Err(format!("unexpected keyword argument `{}`", unexpected));
    }
    Ok(name.and_then(|n| map.get(n)))
}
