use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a work order. The service emits either strings or numbers; both
/// normalize to the same textual key, so `1`, `1.0` and `"1"` name the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkOrderId {
    Text(String),
    Number(serde_json::Number),
}

impl WorkOrderId {
    /// The normalized key used for indexing and for node ids.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderId::Text(text) => write!(f, "{}", text),
            WorkOrderId::Number(number) => match number.as_f64() {
                // Integral floats read as integers: `1.0` and `1` are one key.
                Some(value)
                    if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 =>
                {
                    write!(f, "{}", value as i64)
                }
                _ => write!(f, "{}", number),
            },
        }
    }
}

impl From<&str> for WorkOrderId {
    fn from(value: &str) -> Self {
        WorkOrderId::Text(value.to_string())
    }
}

impl From<String> for WorkOrderId {
    fn from(value: String) -> Self {
        WorkOrderId::Text(value)
    }
}

impl From<u64> for WorkOrderId {
    fn from(value: u64) -> Self {
        WorkOrderId::Number(value.into())
    }
}

/// One line of a work order's bill of materials.
///
/// Only `item` is interpreted. `price` and `vendor` are kept exactly as received,
/// so a price written as text (`"$1,200"`) passes through to the details view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterialsItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Value>,
}

impl BillOfMaterialsItem {
    /// The vendor name, when it was given as text.
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor.as_ref().and_then(Value::as_str)
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A unit of construction work as emitted by the generation service.
///
/// `duration_days` and `estimated_cost` cover the order's own work only; the
/// contribution of child orders is computed during materialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_days: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_cost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bill_of_materials: Vec<BillOfMaterialsItem>,
    /// Stakeholder name to free-form metadata. Key order follows the payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stakeholders: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub child_work_orders: Vec<WorkOrderId>,
}

impl WorkOrder {
    pub fn new(
        id: impl Into<WorkOrderId>,
        task: &str,
        duration_days: f64,
        estimated_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            task: task.to_string(),
            duration_days,
            estimated_cost,
            bill_of_materials: Vec::new(),
            stakeholders: Map::new(),
            child_work_orders: Vec::new(),
        }
    }

    pub fn with_children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<WorkOrderId>,
    {
        self.child_work_orders = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_material(mut self, item: &str, price: f64, vendor: &str) -> Self {
        self.bill_of_materials.push(BillOfMaterialsItem {
            item: item.to_string(),
            price: Some(Value::from(price)),
            vendor: Some(Value::from(vendor)),
        });
        self
    }

    pub fn with_stakeholder(mut self, name: &str, metadata: Value) -> Self {
        self.stakeholders.insert(name.to_string(), metadata);
        self
    }
}
