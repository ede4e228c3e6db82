// ── Document index transcoder ──

use serde_json::{Value, json};
use vellum_api::types::{
    DocumentIndexCreateRequest, DocumentIndexRead, PatchedDocumentIndexUpdateRequest,
};

use super::{changed, ensure_unchanged, required_enum};
use crate::codec::WireEnum;
use crate::error::CoreError;
use crate::model::{DocumentIndex, DocumentIndexData, EntityStatus, Environment};

const RESOURCE: &str = "document index";

/// Indexing configuration applied when the author supplies none: sentence
/// chunking (1000 characters, 50% minimum overlap) vectorized with
/// `hkunlp/instructor-xl` over plain text.
pub fn default_indexing_config() -> Value {
    json!({
        "chunking": {
            "chunker_name": "sentence-chunker",
            "chunker_config": {
                "character_limit": 1000,
                "min_overlap_ratio": 0.5
            }
        },
        "vectorizer": {
            "model_name": "hkunlp/instructor-xl",
            "config": {
                "instruction_domain": "",
                "instruction_document_text_type": "plain_text",
                "instruction_query_text_type": "plain_text"
            }
        }
    })
}

pub fn to_create_request(desired: &DocumentIndex) -> Result<DocumentIndexCreateRequest, CoreError> {
    if let Some(config) = &desired.indexing_config {
        if !config.is_object() {
            return Err(CoreError::validation(
                "indexing_config",
                "must be a JSON object",
            ));
        }
    }

    Ok(DocumentIndexCreateRequest {
        label: desired.label.clone(),
        name: desired.name.clone(),
        status: desired.status.map(|s| s.token().to_owned()),
        environment: desired.environment.map(|e| e.token().to_owned()),
        indexing_config: desired.indexing_config.clone(),
        copy_documents_from_index_id: desired.copy_documents_from_index_id.clone(),
    })
}

/// Fill in [`default_indexing_config`] unless the author chose one.
pub fn with_default_indexing_config(
    mut request: DocumentIndexCreateRequest,
) -> DocumentIndexCreateRequest {
    if request.indexing_config.is_none() {
        request.indexing_config = Some(default_indexing_config());
    }
    request
}

pub fn to_partial_update_request(
    desired: &DocumentIndex,
    prior: &DocumentIndex,
) -> Result<PatchedDocumentIndexUpdateRequest, CoreError> {
    ensure_unchanged("name", Some(&desired.name), Some(&prior.name))?;
    ensure_unchanged(
        "indexing_config",
        desired.indexing_config.as_ref(),
        prior.indexing_config.as_ref(),
    )?;
    ensure_unchanged(
        "copy_documents_from_index_id",
        desired.copy_documents_from_index_id.as_ref(),
        prior.copy_documents_from_index_id.as_ref(),
    )?;

    Ok(PatchedDocumentIndexUpdateRequest {
        label: changed(Some(&desired.label), Some(&prior.label)),
        status: changed(desired.status.as_ref(), prior.status.as_ref()).map(token),
        environment: changed(desired.environment.as_ref(), prior.environment.as_ref()).map(token),
    })
}

/// Merge a snapshot into state. `prior` supplies what the API never echoes.
pub fn from_snapshot(
    snapshot: DocumentIndexRead,
    prior: Option<&DocumentIndex>,
) -> Result<DocumentIndex, CoreError> {
    let status: EntityStatus = required_enum(RESOURCE, "status", snapshot.status)?;
    let environment: Environment = required_enum(RESOURCE, "environment", snapshot.environment)?;

    Ok(DocumentIndex {
        id: Some(snapshot.id),
        name: snapshot.name,
        label: snapshot.label,
        environment: Some(environment),
        status: Some(status),
        indexing_config: snapshot
            .indexing_config
            .or_else(|| prior.and_then(|p| p.indexing_config.clone())),
        copy_documents_from_index_id: prior.and_then(|p| p.copy_documents_from_index_id.clone()),
        created: Some(snapshot.created.into()),
    })
}

pub fn data_from_snapshot(snapshot: DocumentIndexRead) -> Result<DocumentIndexData, CoreError> {
    let status: EntityStatus = required_enum(RESOURCE, "status", snapshot.status)?;
    let environment: Environment = required_enum(RESOURCE, "environment", snapshot.environment)?;

    Ok(DocumentIndexData {
        id: Some(snapshot.id),
        name: Some(snapshot.name),
        label: Some(snapshot.label),
        environment: Some(environment),
        status: Some(status),
        created: Some(snapshot.created.into()),
    })
}

fn token<E: WireEnum>(value: E) -> String {
    value.token().to_owned()
}
