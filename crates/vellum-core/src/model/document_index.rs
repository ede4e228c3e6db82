use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{EntityStatus, Environment};
use super::timestamp::Timestamp;

/// State of a `vellum_document_index` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndex {
    /// Assigned by Vellum on create.
    #[serde(default)]
    pub id: Option<String>,
    /// Unique within the workspace. Changing it forces a new index.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub status: Option<EntityStatus>,
    /// Chunking and vectorizer settings. Only honoured at creation time.
    #[serde(default)]
    pub indexing_config: Option<Value>,
    /// Seed the new index with the documents of an existing one. Create-only,
    /// never echoed back by the API.
    #[serde(default)]
    pub copy_documents_from_index_id: Option<String>,
    #[serde(default)]
    pub created: Option<Timestamp>,
}

/// State of a `vellum_document_index` data source lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndexData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub status: Option<EntityStatus>,
    #[serde(default)]
    pub created: Option<Timestamp>,
}
