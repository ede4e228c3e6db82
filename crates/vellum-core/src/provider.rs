// ── Provider registry and host boundary ──
//
// Type-erased lifecycle entry points over JSON documents. Every call
// returns the state the host should keep next to its diagnostics; a
// failure on one resource never prevents reporting on the others.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use vellum_api::client::DEFAULT_BASE_URL;
use vellum_api::{TransportConfig, VellumClient};

use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::data_source::{DataSource, DataSourceSpec};
use crate::diagnostics::{Diagnostic, Diagnostics, Operation};
use crate::error::CoreError;
use crate::hooks::{DataSourceHooks, DocumentIndexHooks, NoHooks, ResourceHooks};
use crate::reconcile::{ReadOutcome, Resource, ResourceSpec};
use crate::resources::{
    DocumentIndexDataSource, DocumentIndexResource, MlModelDataSource, MlModelResource,
};
use crate::schema::{Attribute, Role, Schema, ValidationMode};

pub const PROVIDER_NAME: &str = "vellum";

/// Outcome of one lifecycle call as the host sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    /// State to keep. `None` means the instance is not (or no longer) tracked.
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl Response {
    fn ok(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    fn new(state: Option<Value>, diagnostics: Diagnostics) -> Self {
        Self { state, diagnostics }
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

#[async_trait]
pub trait ManagedResource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    /// Check author configuration without touching the network.
    fn validate(&self, config: &Value) -> Diagnostics;

    async fn create(&self, ctx: &CallContext, planned: Value) -> Response;
    async fn read(&self, ctx: &CallContext, prior: Value) -> Response;
    async fn update(&self, ctx: &CallContext, planned: Value, prior: Value) -> Response;
    async fn delete(&self, ctx: &CallContext, prior: Value) -> Response;
    async fn import(&self, ctx: &CallContext, id: &str) -> Response;
}

#[async_trait]
pub trait ManagedDataSource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    fn validate(&self, config: &Value) -> Diagnostics;
    async fn read(&self, ctx: &CallContext, config: Value) -> Response;
}

// ── State documents ──────────────────────────────────────────────────

fn decode_state<M: DeserializeOwned>(document: Value) -> Result<M, CoreError> {
    serde_json::from_value(document).map_err(|e| CoreError::Config {
        message: format!("malformed state document: {e}"),
    })
}

fn encode_state<M: Serialize>(model: &M) -> Result<Value, CoreError> {
    serde_json::to_value(model).map_err(|e| CoreError::Internal(e.to_string()))
}

fn lookup_diagnostic(err: &CoreError, resource: &str) -> Diagnostic {
    match err {
        CoreError::AmbiguousLookup { .. } | CoreError::MissingLookup { .. } => {
            Diagnostic::error(err.to_string(), err.hint()).at("id")
        }
        other => Diagnostic::from_error(Operation::Read, resource, other),
    }
}

// ── Resources ────────────────────────────────────────────────────────

impl<S: ResourceSpec, H: ResourceHooks<S>> Resource<S, H> {
    fn check_planned(&self, planned: &Value) -> Diagnostics {
        self.schema().validate(planned, ValidationMode::Planned)
    }
}

#[async_trait]
impl<S: ResourceSpec, H: ResourceHooks<S>> ManagedResource for Resource<S, H> {
    fn type_name(&self) -> &'static str {
        S::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Resource::schema(self)
    }

    fn validate(&self, config: &Value) -> Diagnostics {
        Resource::schema(self).validate(config, ValidationMode::Config)
    }

    /// On failure nothing is kept: the object may not exist.
    async fn create(&self, ctx: &CallContext, planned: Value) -> Response {
        let diagnostics = self.check_planned(&planned);
        if diagnostics.has_error() {
            return Response::new(None, diagnostics);
        }

        let result = async {
            let desired: S::Model = decode_state(planned)?;
            let state = Resource::create(self, ctx, &desired).await?;
            encode_state(&state)
        }
        .await;

        match result {
            Ok(state) => Response::ok(state),
            Err(err) => Response::new(
                None,
                Diagnostic::from_error(Operation::Create, S::DISPLAY_NAME, &err).into(),
            ),
        }
    }

    /// Not-found drops the instance with a warning; other failures keep prior state.
    async fn read(&self, ctx: &CallContext, prior: Value) -> Response {
        let result = async {
            let model: S::Model = decode_state(prior.clone())?;
            let outcome = Resource::read(self, ctx, &model).await?;
            Ok::<_, CoreError>((model, outcome))
        }
        .await;

        match result {
            Ok((_, ReadOutcome::Found(state))) => match encode_state(&state) {
                Ok(state) => Response::ok(state),
                Err(err) => Response::new(
                    Some(prior),
                    Diagnostic::from_error(Operation::Read, S::DISPLAY_NAME, &err).into(),
                ),
            },
            Ok((model, ReadOutcome::Gone)) => {
                let id = S::id(&model).unwrap_or_default();
                Response::new(
                    None,
                    Diagnostic::warning(
                        format!("Removing {} from state", S::DISPLAY_NAME),
                        format!(
                            "The {} {id} no longer exists in Vellum; \
                             it was deleted outside of this provider.",
                            S::DISPLAY_NAME
                        ),
                    )
                    .into(),
                )
            }
            Err(err) => Response::new(
                Some(prior),
                Diagnostic::from_error(Operation::Read, S::DISPLAY_NAME, &err).into(),
            ),
        }
    }

    /// On failure the prior state is kept unchanged.
    async fn update(&self, ctx: &CallContext, planned: Value, prior: Value) -> Response {
        let diagnostics = self.check_planned(&planned);
        if diagnostics.has_error() {
            return Response::new(Some(prior), diagnostics);
        }

        let result = async {
            let desired: S::Model = decode_state(planned)?;
            let previous: S::Model = decode_state(prior.clone())?;
            let state = Resource::update(self, ctx, &desired, &previous).await?;
            encode_state(&state)
        }
        .await;

        match result {
            Ok(state) => Response::ok(state),
            Err(err) => Response::new(
                Some(prior),
                Diagnostic::from_error(Operation::Update, S::DISPLAY_NAME, &err).into(),
            ),
        }
    }

    /// On failure the instance stays tracked so the delete can be retried.
    async fn delete(&self, ctx: &CallContext, prior: Value) -> Response {
        let result = async {
            let previous: S::Model = decode_state(prior.clone())?;
            Resource::delete(self, ctx, &previous).await
        }
        .await;

        match result {
            Ok(()) => Response::default(),
            Err(err) => Response::new(
                Some(prior),
                Diagnostic::from_error(Operation::Delete, S::DISPLAY_NAME, &err).into(),
            ),
        }
    }

    async fn import(&self, ctx: &CallContext, id: &str) -> Response {
        let result = async {
            let state = Resource::import(self, ctx, id).await?;
            encode_state(&state)
        }
        .await;

        match result {
            Ok(state) => Response::ok(state),
            Err(err) => Response::new(
                None,
                Diagnostic::from_error(Operation::Import, S::DISPLAY_NAME, &err).into(),
            ),
        }
    }
}

// ── Data sources ─────────────────────────────────────────────────────

#[async_trait]
impl<D: DataSourceSpec, H: DataSourceHooks<D>> ManagedDataSource for DataSource<D, H> {
    fn type_name(&self) -> &'static str {
        D::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        DataSource::schema(self)
    }

    fn validate(&self, config: &Value) -> Diagnostics {
        let mut diagnostics = DataSource::schema(self).validate(config, ValidationMode::Config);
        if diagnostics.has_error() {
            return diagnostics;
        }
        let key = decode_state::<D::Model>(config.clone()).and_then(|model| D::lookup(&model));
        if let Err(err) = key {
            diagnostics.push(lookup_diagnostic(&err, D::DISPLAY_NAME));
        }
        diagnostics
    }

    async fn read(&self, ctx: &CallContext, config: Value) -> Response {
        let diagnostics = DataSource::schema(self).validate(&config, ValidationMode::Config);
        if diagnostics.has_error() {
            return Response::new(None, diagnostics);
        }

        let result = async {
            let model: D::Model = decode_state(config)?;
            let state = DataSource::read(self, ctx, &model).await?;
            encode_state(&state)
        }
        .await;

        match result {
            Ok(state) => Response::ok(state),
            Err(err) => Response::new(None, lookup_diagnostic(&err, D::DISPLAY_NAME).into()),
        }
    }
}

// ── Provider ─────────────────────────────────────────────────────────

/// Every schema the provider exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<&'static str, Schema>,
    pub data_sources: BTreeMap<&'static str, Schema>,
}

/// Registry of resource and data source types sharing one client.
pub struct Provider {
    resources: BTreeMap<&'static str, Box<dyn ManagedResource>>,
    data_sources: BTreeMap<&'static str, Box<dyn ManagedDataSource>>,
}

impl Provider {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = VellumClient::new(config.base_url.as_str(), &config.api_key, &transport)?;
        Ok(Self::with_client(client))
    }

    /// A provider that can describe and validate, but holds no credentials.
    pub fn offline() -> Result<Self, CoreError> {
        let client = VellumClient::anonymous(DEFAULT_BASE_URL, &TransportConfig::default())?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: VellumClient) -> Self {
        let mut provider = Self {
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        };

        provider.register_resource(Resource::<DocumentIndexResource, _>::new(
            client.clone(),
            DocumentIndexHooks,
        ));
        provider.register_resource(Resource::<MlModelResource, _>::new(client.clone(), NoHooks));
        provider.register_data_source(DataSource::<DocumentIndexDataSource, _>::new(
            client.clone(),
            NoHooks,
        ));
        provider.register_data_source(DataSource::<MlModelDataSource, _>::new(client, NoHooks));

        debug!(
            resources = provider.resources.len(),
            data_sources = provider.data_sources.len(),
            "provider configured"
        );
        provider
    }

    pub fn register_resource(&mut self, resource: impl ManagedResource + 'static) {
        self.resources.insert(resource.type_name(), Box::new(resource));
    }

    pub fn register_data_source(&mut self, data_source: impl ManagedDataSource + 'static) {
        self.data_sources
            .insert(data_source.type_name(), Box::new(data_source));
    }

    pub fn resource(&self, type_name: &str) -> Option<&dyn ManagedResource> {
        self.resources.get(type_name).map(|r| &**r)
    }

    pub fn data_source(&self, type_name: &str) -> Option<&dyn ManagedDataSource> {
        self.data_sources.get(type_name).map(|d| &**d)
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn data_source_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    /// Provider-level configuration block.
    pub fn config_schema() -> Schema {
        Schema {
            description: "Manage Vellum resources declaratively.",
            attributes: vec![
                Attribute::string("api_key", Role::Optional)
                    .describe(
                        "API key used to authenticate with Vellum. \
                         Used only when VELLUM_API_KEY is not set.",
                    )
                    .sensitive(),
            ],
        }
    }

    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: Self::config_schema(),
            resources: self
                .resources
                .iter()
                .map(|(name, r)| (*name, r.schema()))
                .collect(),
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, d)| (*name, d.schema()))
                .collect(),
        }
    }
}
