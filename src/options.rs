use serde::{Deserialize, Serialize};
use std::fs;

/// What to do with a `child_work_orders` entry that names an order missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Skip the reference and keep materializing its siblings.
    #[default]
    Skip,
    /// Abort with `MaterializeError::DanglingReference`.
    Error,
}

/// Tunables of a materialization run. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeOptions {
    /// Pixels between neighbouring siblings.
    pub horizontal_spacing: f64,
    /// Pixels between two depth levels.
    pub vertical_spacing: f64,
    /// Level of the project node. Root work orders sit one level below.
    pub root_level: usize,
    /// Longest accepted chain of nested work orders.
    pub max_depth: usize,
    pub dangling: DanglingPolicy,
    /// Label used when the caller does not supply one.
    pub root_label: String,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            horizontal_spacing: 250.0,
            vertical_spacing: 100.0,
            root_level: 1,
            max_depth: 256,
            dangling: DanglingPolicy::Skip,
            root_label: "Project".to_string(),
        }
    }
}

impl MaterializeOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
