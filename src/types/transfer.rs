use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File name used when the full dataset is exported.
pub const BACKUP_FILE_NAME: &str = "nav-panel-backup.json";

/// The full dataset moved by export and import.
///
/// Every section stays opaque JSON so fields this crate doesn't model (an engine's
/// `iconData`, for one) survive export, the backup file and re-import. The backend
/// is the only validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websites: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_engines: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}
