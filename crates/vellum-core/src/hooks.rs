// ── Extension hooks ──
//
// Every lifecycle entry point and transcoder can be overridden per resource
// type. Each default forwards to the base implementation, so an override
// either replaces it outright or calls `base` and post-processes the result.

use async_trait::async_trait;
use vellum_api::types::DocumentIndexCreateRequest;

use crate::context::CallContext;
use crate::data_source::{DataSourceReader, DataSourceSpec};
use crate::error::CoreError;
use crate::model::DocumentIndex;
use crate::reconcile::{ReadOutcome, Reconciler, ResourceSpec};
use crate::resources::DocumentIndexResource;
use crate::schema::Schema;
use crate::transcode::document_index;

#[async_trait]
pub trait ResourceHooks<S: ResourceSpec>: Send + Sync + 'static {
    fn schema(&self, base: &Reconciler<S>) -> Schema {
        base.schema()
    }

    fn to_create_request(
        &self,
        base: &Reconciler<S>,
        desired: &S::Model,
    ) -> Result<S::CreateRequest, CoreError> {
        base.to_create_request(desired)
    }

    fn to_partial_update_request(
        &self,
        base: &Reconciler<S>,
        desired: &S::Model,
        prior: &S::Model,
    ) -> Result<S::UpdateRequest, CoreError> {
        base.to_partial_update_request(desired, prior)
    }

    fn from_snapshot(
        &self,
        base: &Reconciler<S>,
        snapshot: S::Snapshot,
        prior: Option<&S::Model>,
    ) -> Result<S::Model, CoreError> {
        base.from_snapshot(snapshot, prior)
    }

    async fn create(
        &self,
        base: &Reconciler<S>,
        ctx: &CallContext,
        desired: &S::Model,
    ) -> Result<S::Model, CoreError> {
        base.create(self, ctx, desired).await
    }

    async fn read(
        &self,
        base: &Reconciler<S>,
        ctx: &CallContext,
        prior: &S::Model,
    ) -> Result<ReadOutcome<S::Model>, CoreError> {
        base.read(self, ctx, prior).await
    }

    async fn update(
        &self,
        base: &Reconciler<S>,
        ctx: &CallContext,
        desired: &S::Model,
        prior: &S::Model,
    ) -> Result<S::Model, CoreError> {
        base.update(self, ctx, desired, prior).await
    }

    async fn delete(
        &self,
        base: &Reconciler<S>,
        ctx: &CallContext,
        prior: &S::Model,
    ) -> Result<(), CoreError> {
        base.delete(ctx, prior).await
    }

    async fn import(
        &self,
        base: &Reconciler<S>,
        ctx: &CallContext,
        id: &str,
    ) -> Result<S::Model, CoreError> {
        base.import(self, ctx, id).await
    }
}

#[async_trait]
pub trait DataSourceHooks<D: DataSourceSpec>: Send + Sync + 'static {
    fn schema(&self, base: &DataSourceReader<D>) -> Schema {
        base.schema()
    }

    async fn read(
        &self,
        base: &DataSourceReader<D>,
        ctx: &CallContext,
        config: &D::Model,
    ) -> Result<D::Model, CoreError> {
        base.read(ctx, config).await
    }
}

/// Use every default unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<S: ResourceSpec> ResourceHooks<S> for NoHooks {}

impl<D: DataSourceSpec> DataSourceHooks<D> for NoHooks {}

// ── Document index ───────────────────────────────────────────────────

/// Injects the default indexing configuration on create. When the create
/// response leaves it out, state records the configuration that was sent.
/// Read, update and delete are untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentIndexHooks;

#[async_trait]
impl ResourceHooks<DocumentIndexResource> for DocumentIndexHooks {
    fn to_create_request(
        &self,
        base: &Reconciler<DocumentIndexResource>,
        desired: &DocumentIndex,
    ) -> Result<DocumentIndexCreateRequest, CoreError> {
        base.to_create_request(desired)
            .map(document_index::with_default_indexing_config)
    }

    async fn create(
        &self,
        base: &Reconciler<DocumentIndexResource>,
        ctx: &CallContext,
        desired: &DocumentIndex,
    ) -> Result<DocumentIndex, CoreError> {
        let mut state = base.create(self, ctx, desired).await?;
        if state.indexing_config.is_none() {
            state.indexing_config = self.to_create_request(base, desired)?.indexing_config;
        }
        Ok(state)
    }
}
