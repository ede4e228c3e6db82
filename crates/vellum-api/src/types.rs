// Wire shapes for the Vellum REST API.
//
// Enumerations stay as raw tokens here; `vellum-core` owns the closed
// token sets and rejects anything outside them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Patch;

// ── Document indexes ─────────────────────────────────────────────────

/// `GET /v1/document-indexes/{id}` and the echo of create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndexRead {
    pub id: String,
    pub created: DateTime<Utc>,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub indexing_config: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentIndexCreateRequest {
    pub label: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_documents_from_index_id: Option<String>,
}

/// Body of `PATCH /v1/document-indexes/{id}`. Absent fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchedDocumentIndexUpdateRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub label: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub environment: Patch<String>,
}

// ── ML models ────────────────────────────────────────────────────────

/// Enumerated value echoed together with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlModelExecConfig {
    pub model_identifier: String,
    pub base_url: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlModelRead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: Option<String>,
    pub hosted_by: String,
    pub developed_by: LabelledValue,
    pub family: LabelledValue,
    pub exec_config: MlModelExecConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlModelCreateRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    pub hosted_by: String,
    pub developed_by: String,
    pub family: String,
    pub exec_config: MlModelExecConfig,
}

/// Body of `PATCH /v1/ml-models/{id}`. Only visibility is mutable in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchedMlModelUpdateRequest {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub visibility: Patch<String>,
}
