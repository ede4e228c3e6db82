use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::{HostedBy, ModelDeveloper, ModelFamily, ModelFeature, Visibility};

/// State of a `vellum_ml_model` resource.
///
/// Everything except `visibility` is fixed at creation; the platform has no
/// hard delete, so destroying the resource disables it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlModel {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub visibility: Visibility,
    pub hosted_by: HostedBy,
    pub developed_by: ModelDeveloper,
    pub family: ModelFamily,
    pub exec_config: ExecConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    pub model_identifier: String,
    pub base_url: String,
    /// String values holding JSON text are sent as the parsed JSON value.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub features: Vec<ModelFeature>,
}

/// State of a `vellum_ml_model` data source lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlModelData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub hosted_by: Option<HostedBy>,
    #[serde(default)]
    pub developed_by: Option<ModelDeveloper>,
    #[serde(default)]
    pub family: Option<ModelFamily>,
}
