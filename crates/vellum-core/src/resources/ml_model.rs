use async_trait::async_trait;
use vellum_api::VellumClient;
use vellum_api::types::{MlModelCreateRequest, MlModelRead, PatchedMlModelUpdateRequest};

use crate::codec::EnumKind;
use crate::data_source::DataSourceSpec;
use crate::error::CoreError;
use crate::model::{MlModel, MlModelData};
use crate::reconcile::{Deletion, ResourceSpec};
use crate::schema::{AttrKind, Attribute, Role, Schema};
use crate::transcode::ml_model as transcode;

const ID: &str = "The ML Model's ID";
const NAME: &str = "The unique name of the ML Model";
const VISIBILITY: &str = "The visibility of the ML Model: DEFAULT, PUBLIC, PRIVATE or DISABLED";
const HOSTED_BY: &str = "The organization hosting the ML Model";
const DEVELOPED_BY: &str = "The organization that developed the ML Model";
const FAMILY: &str = "The family of the ML Model";

/// `vellum_ml_model`: there is no destroy endpoint, so delete disables it.
pub struct MlModelResource;

fn exec_config() -> Attribute {
    Attribute::new(
        "exec_config",
        AttrKind::Object(vec![
            Attribute::string("model_identifier", Role::Required)
                .describe("The model identifier used by the hosting provider"),
            Attribute::string("base_url", Role::Required)
                .describe("The base URL of the hosting provider's API"),
            Attribute::new("metadata", AttrKind::StringMap, Role::Optional)
                .describe("Provider-specific settings. Values holding JSON are sent as JSON."),
            Attribute::new(
                "features",
                AttrKind::List(Box::new(AttrKind::String)),
                Role::Optional,
            )
            .describe("Capabilities the model supports")
            .one_of(EnumKind::ModelFeature),
        ]),
        Role::Required,
    )
    .describe("How Vellum should call the model")
    .requires_replace()
}

#[async_trait]
impl ResourceSpec for MlModelResource {
    type Model = MlModel;
    type CreateRequest = MlModelCreateRequest;
    type UpdateRequest = PatchedMlModelUpdateRequest;
    type Snapshot = MlModelRead;

    const TYPE_NAME: &'static str = "vellum_ml_model";
    const DISPLAY_NAME: &'static str = "ML model";

    fn schema() -> Schema {
        Schema {
            description: "A Vellum ML model registration.",
            attributes: vec![
                Attribute::string("id", Role::Computed).describe(ID),
                Attribute::string("name", Role::Required)
                    .describe(NAME)
                    .length(1, 150)
                    .requires_replace(),
                Attribute::string("visibility", Role::Required)
                    .describe(VISIBILITY)
                    .one_of(EnumKind::Visibility),
                Attribute::string("hosted_by", Role::Required)
                    .describe(HOSTED_BY)
                    .one_of(EnumKind::HostedBy)
                    .requires_replace(),
                Attribute::string("developed_by", Role::Required)
                    .describe(DEVELOPED_BY)
                    .one_of(EnumKind::ModelDeveloper)
                    .requires_replace(),
                Attribute::string("family", Role::Required)
                    .describe(FAMILY)
                    .one_of(EnumKind::ModelFamily)
                    .requires_replace(),
                exec_config(),
            ],
        }
    }

    fn id(model: &MlModel) -> Option<&str> {
        model.id.as_deref()
    }

    fn to_create_request(desired: &MlModel) -> Result<MlModelCreateRequest, CoreError> {
        transcode::to_create_request(desired)
    }

    fn to_partial_update_request(
        desired: &MlModel,
        prior: &MlModel,
    ) -> Result<PatchedMlModelUpdateRequest, CoreError> {
        transcode::to_partial_update_request(desired, prior)
    }

    fn from_snapshot(snapshot: MlModelRead, prior: Option<&MlModel>) -> Result<MlModel, CoreError> {
        transcode::from_snapshot(snapshot, prior)
    }

    fn deletion() -> Deletion<PatchedMlModelUpdateRequest> {
        Deletion::Disable(transcode::disable_request())
    }

    async fn remote_create(
        client: &VellumClient,
        body: &MlModelCreateRequest,
    ) -> Result<MlModelRead, vellum_api::Error> {
        client.create_ml_model(body).await
    }

    async fn remote_retrieve(
        client: &VellumClient,
        id: &str,
    ) -> Result<MlModelRead, vellum_api::Error> {
        client.retrieve_ml_model(id).await
    }

    async fn remote_update(
        client: &VellumClient,
        id: &str,
        body: &PatchedMlModelUpdateRequest,
    ) -> Result<MlModelRead, vellum_api::Error> {
        client.partial_update_ml_model(id, body).await
    }
}

/// `vellum_ml_model` data source.
pub struct MlModelDataSource;

#[async_trait]
impl DataSourceSpec for MlModelDataSource {
    type Model = MlModelData;
    type Snapshot = MlModelRead;

    const TYPE_NAME: &'static str = "vellum_ml_model";
    const DISPLAY_NAME: &'static str = "ML model";

    fn schema() -> Schema {
        Schema {
            description: "Look up an existing Vellum ML model by id or name.",
            attributes: vec![
                Attribute::string("id", Role::OptionalComputed).describe(ID),
                Attribute::string("name", Role::OptionalComputed).describe(NAME),
                Attribute::string("visibility", Role::Computed)
                    .describe(VISIBILITY)
                    .one_of(EnumKind::Visibility),
                Attribute::string("hosted_by", Role::Computed)
                    .describe(HOSTED_BY)
                    .one_of(EnumKind::HostedBy),
                Attribute::string("developed_by", Role::Computed)
                    .describe(DEVELOPED_BY)
                    .one_of(EnumKind::ModelDeveloper),
                Attribute::string("family", Role::Computed)
                    .describe(FAMILY)
                    .one_of(EnumKind::ModelFamily),
            ],
        }
    }

    fn id(config: &MlModelData) -> Option<&str> {
        config.id.as_deref()
    }

    fn name(config: &MlModelData) -> Option<&str> {
        config.name.as_deref()
    }

    fn from_snapshot(snapshot: MlModelRead) -> Result<MlModelData, CoreError> {
        transcode::data_from_snapshot(snapshot)
    }

    async fn remote_retrieve(
        client: &VellumClient,
        id_or_name: &str,
    ) -> Result<MlModelRead, vellum_api::Error> {
        client.retrieve_ml_model(id_or_name).await
    }
}
