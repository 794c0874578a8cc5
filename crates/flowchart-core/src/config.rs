//! Editor configuration shared by front ends.

use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Transfer key under which drag sources store the drop payload.
pub const DEFAULT_DROP_TRANSFER_KEY: &str = "react-flow-chart";

/// Front-end facing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Data-transfer key carrying the drop payload.
    pub drop_transfer_key: String,
    /// Key names that delete the current selection.
    pub delete_keys: Vec<String>,
    /// Prefix for node ids when ids are generated sequentially.
    pub node_id_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drop_transfer_key: DEFAULT_DROP_TRANSFER_KEY.to_string(),
            delete_keys: vec!["Delete".to_string(), "Backspace".to_string()],
            node_id_prefix: "node".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether `key` is bound to deletion.
    pub fn is_delete_key(&self, key: &str) -> bool {
        self.delete_keys.iter().any(|k| k.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"deleteKeys":["x"]}"#).unwrap();
        assert_eq!(config.drop_transfer_key, DEFAULT_DROP_TRANSFER_KEY);
        assert!(config.is_delete_key("X"));
        assert!(!config.is_delete_key("Delete"));
    }

    #[test]
    fn test_default_delete_keys() {
        let config = EditorConfig::default();
        assert!(config.is_delete_key("Delete"));
        assert!(config.is_delete_key("backspace"));
        assert!(!config.is_delete_key("Escape"));
    }
}
