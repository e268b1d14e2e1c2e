use serde::{Deserialize, Serialize};

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Board-unique ID like `SK-014`
    pub id: String,
    /// Short label (single line, never empty)
    pub name: String,
    /// Free text, possibly multi-line
    #[serde(default)]
    pub description: String,
    /// `added: 2025-05-14`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl Item {
    pub fn new(id: String, name: String, description: String) -> Self {
        Item {
            id,
            name,
            description,
            added: None,
        }
    }
}
