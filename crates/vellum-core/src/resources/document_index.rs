use async_trait::async_trait;
use vellum_api::VellumClient;
use vellum_api::types::{
    DocumentIndexCreateRequest, DocumentIndexRead, PatchedDocumentIndexUpdateRequest,
};

use crate::codec::EnumKind;
use crate::data_source::DataSourceSpec;
use crate::error::CoreError;
use crate::model::{DocumentIndex, DocumentIndexData};
use crate::reconcile::{Deletion, ResourceSpec};
use crate::schema::{AttrKind, Attribute, Role, Schema};
use crate::transcode::document_index as transcode;

const ID: &str = "The Document Index's ID";
const NAME: &str = "A name that uniquely identifies this index within its workspace";
const LABEL: &str = "A human-readable label for the document index";
const ENVIRONMENT: &str =
    "The environment this document index is used in: DEVELOPMENT, STAGING or PRODUCTION";
const STATUS: &str = "The current status of the document index: ACTIVE or ARCHIVED";
const CREATED: &str = "When the document index was created (RFC 3339, UTC)";
const INDEXING_CONFIG: &str = "Chunking and vectorizer settings. \
    Defaults to sentence chunking with hkunlp/instructor-xl.";

/// `vellum_document_index`: hard-deleted through the destroy endpoint.
pub struct DocumentIndexResource;

#[async_trait]
impl ResourceSpec for DocumentIndexResource {
    type Model = DocumentIndex;
    type CreateRequest = DocumentIndexCreateRequest;
    type UpdateRequest = PatchedDocumentIndexUpdateRequest;
    type Snapshot = DocumentIndexRead;

    const TYPE_NAME: &'static str = "vellum_document_index";
    const DISPLAY_NAME: &'static str = "document index";

    fn schema() -> Schema {
        Schema {
            description: "A Vellum document index: a searchable collection of documents.",
            attributes: vec![
                Attribute::string("id", Role::Computed).describe(ID),
                Attribute::string("name", Role::Required)
                    .describe(NAME)
                    .length(1, 150)
                    .requires_replace(),
                Attribute::string("label", Role::Required)
                    .describe(LABEL)
                    .length(1, 150),
                Attribute::string("environment", Role::OptionalComputed)
                    .describe(ENVIRONMENT)
                    .one_of(EnumKind::Environment),
                Attribute::string("status", Role::OptionalComputed)
                    .describe(STATUS)
                    .one_of(EnumKind::EntityStatus),
                Attribute::new("indexing_config", AttrKind::Json, Role::OptionalComputed)
                    .describe(INDEXING_CONFIG)
                    .requires_replace(),
                Attribute::string("copy_documents_from_index_id", Role::Optional)
                    .describe("Seed the new index with the documents of this existing index")
                    .requires_replace(),
                Attribute::string("created", Role::Computed).describe(CREATED),
            ],
        }
    }

    fn id(model: &DocumentIndex) -> Option<&str> {
        model.id.as_deref()
    }

    fn to_create_request(desired: &DocumentIndex) -> Result<DocumentIndexCreateRequest, CoreError> {
        transcode::to_create_request(desired)
    }

    fn to_partial_update_request(
        desired: &DocumentIndex,
        prior: &DocumentIndex,
    ) -> Result<PatchedDocumentIndexUpdateRequest, CoreError> {
        transcode::to_partial_update_request(desired, prior)
    }

    fn from_snapshot(
        snapshot: DocumentIndexRead,
        prior: Option<&DocumentIndex>,
    ) -> Result<DocumentIndex, CoreError> {
        transcode::from_snapshot(snapshot, prior)
    }

    fn deletion() -> Deletion<PatchedDocumentIndexUpdateRequest> {
        Deletion::Destroy
    }

    async fn remote_create(
        client: &VellumClient,
        body: &DocumentIndexCreateRequest,
    ) -> Result<DocumentIndexRead, vellum_api::Error> {
        client.create_document_index(body).await
    }

    async fn remote_retrieve(
        client: &VellumClient,
        id: &str,
    ) -> Result<DocumentIndexRead, vellum_api::Error> {
        client.retrieve_document_index(id).await
    }

    async fn remote_update(
        client: &VellumClient,
        id: &str,
        body: &PatchedDocumentIndexUpdateRequest,
    ) -> Result<DocumentIndexRead, vellum_api::Error> {
        client.partial_update_document_index(id, body).await
    }

    async fn remote_destroy(client: &VellumClient, id: &str) -> Result<(), vellum_api::Error> {
        client.destroy_document_index(id).await
    }
}

/// `vellum_document_index` data source.
pub struct DocumentIndexDataSource;

#[async_trait]
impl DataSourceSpec for DocumentIndexDataSource {
    type Model = DocumentIndexData;
    type Snapshot = DocumentIndexRead;

    const TYPE_NAME: &'static str = "vellum_document_index";
    const DISPLAY_NAME: &'static str = "document index";

    fn schema() -> Schema {
        Schema {
            description: "Look up an existing Vellum document index by id or name.",
            attributes: vec![
                Attribute::string("id", Role::OptionalComputed).describe(ID),
                Attribute::string("name", Role::OptionalComputed).describe(NAME),
                Attribute::string("label", Role::Computed).describe(LABEL),
                Attribute::string("environment", Role::Computed)
                    .describe(ENVIRONMENT)
                    .one_of(EnumKind::Environment),
                Attribute::string("status", Role::Computed)
                    .describe(STATUS)
                    .one_of(EnumKind::EntityStatus),
                Attribute::string("created", Role::Computed).describe(CREATED),
            ],
        }
    }

    fn id(config: &DocumentIndexData) -> Option<&str> {
        config.id.as_deref()
    }

    fn name(config: &DocumentIndexData) -> Option<&str> {
        config.name.as_deref()
    }

    fn from_snapshot(snapshot: DocumentIndexRead) -> Result<DocumentIndexData, CoreError> {
        transcode::data_from_snapshot(snapshot)
    }

    async fn remote_retrieve(
        client: &VellumClient,
        id_or_name: &str,
    ) -> Result<DocumentIndexRead, vellum_api::Error> {
        client.retrieve_document_index(id_or_name).await
    }
}
