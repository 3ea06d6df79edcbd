use serde::{Deserialize, Serialize};

/// A critic review snippet. Value type, owned by a movie's review list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub source: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}
