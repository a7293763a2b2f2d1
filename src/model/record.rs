use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Directory label used for records without a category
pub const UNCATEGORIZED_LABEL: &str = "None";

/// One catalog product as returned by the remote service
///
/// Only the fields the harvester keys on are typed. Everything else (version,
/// endpoints, response payloads, scores, owner) lives in `payload` and is
/// written back out exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Globally unique product id
    pub id: String,

    /// Category name
    ///
    /// The outer `Option` tracks whether the field was sent at all, so an
    /// absent category stays absent on disk and an explicit null stays null.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_field"
    )]
    pub category: Option<Option<String>>,

    /// Filesystem-safe name, unique within a category
    #[serde(rename = "slugifiedName")]
    pub slugified_name: String,

    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Record {
    /// Returns the directory segment this record is filed under
    ///
    /// Missing and empty categories both map to [`UNCATEGORIZED_LABEL`].
    pub fn category_label(&self) -> &str {
        match self.category.as_ref().and_then(|c| c.as_deref()) {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED_LABEL,
        }
    }

    /// Returns the file name this record is persisted under
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slugified_name)
    }
}

/// Marks a field that appeared in the input, even as null
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
