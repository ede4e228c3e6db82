// ── Data sources ──
//
// Read-only lookups of existing objects by exactly one of `id` or `name`.
// The key is checked before any request is made.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use vellum_api::VellumClient;

use crate::context::CallContext;
use crate::error::CoreError;
use crate::hooks::{DataSourceHooks, NoHooks};
use crate::model::LookupKey;
use crate::schema::Schema;

#[async_trait]
pub trait DataSourceSpec: Send + Sync + 'static {
    type Model: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Snapshot: Send;

    const TYPE_NAME: &'static str;
    const DISPLAY_NAME: &'static str;

    fn schema() -> Schema;
    fn id(config: &Self::Model) -> Option<&str>;
    fn name(config: &Self::Model) -> Option<&str>;
    fn from_snapshot(snapshot: Self::Snapshot) -> Result<Self::Model, CoreError>;

    async fn remote_retrieve(
        client: &VellumClient,
        id_or_name: &str,
    ) -> Result<Self::Snapshot, vellum_api::Error>;

    fn lookup(config: &Self::Model) -> Result<LookupKey, CoreError> {
        LookupKey::resolve(Self::DISPLAY_NAME, Self::id(config), Self::name(config))
    }
}

/// Default data source read.
pub struct DataSourceReader<D> {
    client: VellumClient,
    _spec: PhantomData<fn() -> D>,
}

impl<D: DataSourceSpec> DataSourceReader<D> {
    pub fn new(client: VellumClient) -> Self {
        Self {
            client,
            _spec: PhantomData,
        }
    }

    pub fn schema(&self) -> Schema {
        D::schema()
    }

    pub async fn read(&self, ctx: &CallContext, config: &D::Model) -> Result<D::Model, CoreError> {
        let key = D::lookup(config)?;
        debug!(data_source = D::TYPE_NAME, key = key.as_str(), "looking up");

        let snapshot = ctx
            .run(D::remote_retrieve(&self.client, key.as_str()))
            .await
            .map_err(|e| e.for_resource(D::DISPLAY_NAME, key.as_str()))?;
        D::from_snapshot(snapshot)
    }
}

/// A data source with its hooks resolved at construction.
pub struct DataSource<D, H = NoHooks> {
    base: DataSourceReader<D>,
    hooks: H,
}

impl<D: DataSourceSpec, H: DataSourceHooks<D>> DataSource<D, H> {
    pub fn new(client: VellumClient, hooks: H) -> Self {
        Self {
            base: DataSourceReader::new(client),
            hooks,
        }
    }

    pub fn schema(&self) -> Schema {
        self.hooks.schema(&self.base)
    }

    pub async fn read(&self, ctx: &CallContext, config: &D::Model) -> Result<D::Model, CoreError> {
        self.hooks.read(&self.base, ctx, config).await
    }
}
