pub mod model;

pub use model::*;

use crate::envelope;
use crate::error::{EnvelopeError, MaterializeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The decoded body returned by the generation service: a flat list of work orders
/// that reference each other by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub work_orders: Vec<WorkOrder>,
}

impl Payload {
    pub fn new(work_orders: Vec<WorkOrder>) -> Self {
        Self { work_orders }
    }

    /// Decodes a payload from raw JSON text.
    pub fn from_json(text: &str) -> Result<Self, MaterializeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| MaterializeError::malformed(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Decodes a payload from an already parsed JSON value.
    ///
    /// The shape is checked step by step so the error names what is actually wrong:
    /// a missing `work_orders` field, a field of the wrong type, or the position of the
    /// first work order that does not decode.
    pub fn from_value(value: Value) -> Result<Self, MaterializeError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(MaterializeError::malformed(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };

        let items = match fields.remove("work_orders") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(MaterializeError::malformed(format!(
                    "`work_orders` must be an array, found {}",
                    json_kind(&other)
                )));
            }
            None => return Err(MaterializeError::malformed("missing `work_orders` field")),
        };

        let work_orders = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                serde_json::from_value::<WorkOrder>(item).map_err(|e| {
                    MaterializeError::malformed(format!("work order #{}: {}", position, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { work_orders })
    }

    /// Strips the service envelope from `message` and decodes what remains.
    pub fn from_message(message: &str) -> Result<Self, EnvelopeError> {
        let body = envelope::unwrap_message(message)?;
        Ok(Self::from_json(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.work_orders.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
