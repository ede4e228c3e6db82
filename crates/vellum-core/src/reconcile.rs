// ── Lifecycle reconciler ──
//
// Create / Read / Update / Delete / Import for one resource type. Each
// operation is strictly sequential: build the request, issue exactly one
// remote call, parse the answer. Nothing is retried and nothing runs in
// the background.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use vellum_api::VellumClient;

use crate::context::CallContext;
use crate::error::CoreError;
use crate::hooks::{NoHooks, ResourceHooks};
use crate::schema::Schema;

/// How a resource type leaves the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion<U> {
    /// Issue the destroy endpoint.
    Destroy,
    /// No hard delete exists; apply this partial update instead.
    Disable(U),
}

/// Result of a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<M> {
    Found(M),
    /// Deleted out-of-band; the host should drop the instance.
    Gone,
}

/// Everything the reconciler needs to know about one resource type.
#[async_trait]
pub trait ResourceSpec: Send + Sync + 'static {
    type Model: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type CreateRequest: Send + Sync;
    type UpdateRequest: Send + Sync;
    type Snapshot: Send;

    /// Registry name, e.g. `vellum_document_index`.
    const TYPE_NAME: &'static str;
    /// Human name used in diagnostics, e.g. `document index`.
    const DISPLAY_NAME: &'static str;

    fn schema() -> Schema;
    fn id(model: &Self::Model) -> Option<&str>;

    fn to_create_request(desired: &Self::Model) -> Result<Self::CreateRequest, CoreError>;
    fn to_partial_update_request(
        desired: &Self::Model,
        prior: &Self::Model,
    ) -> Result<Self::UpdateRequest, CoreError>;
    fn from_snapshot(
        snapshot: Self::Snapshot,
        prior: Option<&Self::Model>,
    ) -> Result<Self::Model, CoreError>;

    fn deletion() -> Deletion<Self::UpdateRequest>;

    async fn remote_create(
        client: &VellumClient,
        body: &Self::CreateRequest,
    ) -> Result<Self::Snapshot, vellum_api::Error>;

    async fn remote_retrieve(
        client: &VellumClient,
        id: &str,
    ) -> Result<Self::Snapshot, vellum_api::Error>;

    async fn remote_update(
        client: &VellumClient,
        id: &str,
        body: &Self::UpdateRequest,
    ) -> Result<Self::Snapshot, vellum_api::Error>;

    async fn remote_destroy(client: &VellumClient, id: &str) -> Result<(), vellum_api::Error> {
        let _ = (client, id);
        Err(vellum_api::Error::UnsupportedOperation("destroy"))
    }
}

// ── Base reconciler ──────────────────────────────────────────────────

/// Default implementation of every lifecycle entry point.
///
/// Operations take the active hooks so that transcoder overrides apply even
/// when the operation itself is not overridden.
pub struct Reconciler<S> {
    client: VellumClient,
    _spec: PhantomData<fn() -> S>,
}

impl<S: ResourceSpec> Reconciler<S> {
    pub fn new(client: VellumClient) -> Self {
        Self {
            client,
            _spec: PhantomData,
        }
    }

    pub fn client(&self) -> &VellumClient {
        &self.client
    }

    // ── Transcoding defaults ─────────────────────────────────────────

    pub fn schema(&self) -> Schema {
        S::schema()
    }

    pub fn to_create_request(&self, desired: &S::Model) -> Result<S::CreateRequest, CoreError> {
        S::to_create_request(desired)
    }

    pub fn to_partial_update_request(
        &self,
        desired: &S::Model,
        prior: &S::Model,
    ) -> Result<S::UpdateRequest, CoreError> {
        S::to_partial_update_request(desired, prior)
    }

    pub fn from_snapshot(
        &self,
        snapshot: S::Snapshot,
        prior: Option<&S::Model>,
    ) -> Result<S::Model, CoreError> {
        S::from_snapshot(snapshot, prior)
    }

    // ── Lifecycle defaults ───────────────────────────────────────────

    /// No automatic retry: an ambiguous failure could leave a duplicate behind.
    pub async fn create<H>(
        &self,
        hooks: &H,
        ctx: &CallContext,
        desired: &S::Model,
    ) -> Result<S::Model, CoreError>
    where
        H: ResourceHooks<S> + ?Sized,
    {
        let body = hooks.to_create_request(self, desired)?;
        debug!(resource = S::TYPE_NAME, "creating");

        let snapshot = ctx.run(S::remote_create(&self.client, &body)).await?;
        let state = hooks.from_snapshot(self, snapshot, Some(desired))?;

        info!(
            resource = S::TYPE_NAME,
            id = S::id(&state).unwrap_or_default(),
            "created"
        );
        Ok(state)
    }

    /// Refresh from the platform. Never mutates remote state.
    pub async fn read<H>(
        &self,
        hooks: &H,
        ctx: &CallContext,
        prior: &S::Model,
    ) -> Result<ReadOutcome<S::Model>, CoreError>
    where
        H: ResourceHooks<S> + ?Sized,
    {
        let id = Self::require_id(prior)?;
        debug!(resource = S::TYPE_NAME, id, "reading");

        match ctx.run(S::remote_retrieve(&self.client, id)).await {
            Ok(snapshot) => Ok(ReadOutcome::Found(hooks.from_snapshot(
                self,
                snapshot,
                Some(prior),
            )?)),
            Err(err) if err.is_not_found() => {
                warn!(resource = S::TYPE_NAME, id, "removed outside of this provider");
                Ok(ReadOutcome::Gone)
            }
            Err(err) => Err(err),
        }
    }

    /// Apply the partial update computed from `desired` against `prior`.
    ///
    /// The PATCH is sent even when it carries no fields, so the returned
    /// state always reflects the platform.
    pub async fn update<H>(
        &self,
        hooks: &H,
        ctx: &CallContext,
        desired: &S::Model,
        prior: &S::Model,
    ) -> Result<S::Model, CoreError>
    where
        H: ResourceHooks<S> + ?Sized,
    {
        let id = Self::require_id(prior)?;
        let body = hooks.to_partial_update_request(self, desired, prior)?;
        debug!(resource = S::TYPE_NAME, id, "updating");

        let snapshot = ctx
            .run(S::remote_update(&self.client, id, &body))
            .await
            .map_err(|e| e.for_resource(S::DISPLAY_NAME, id))?;
        let state = hooks.from_snapshot(self, snapshot, Some(desired))?;

        info!(resource = S::TYPE_NAME, id, "updated");
        Ok(state)
    }

    /// Remove the object according to the type's [`Deletion`] policy.
    pub async fn delete(&self, ctx: &CallContext, prior: &S::Model) -> Result<(), CoreError> {
        let id = Self::require_id(prior)?;

        match S::deletion() {
            Deletion::Destroy => {
                debug!(resource = S::TYPE_NAME, id, "destroying");
                ctx.run(S::remote_destroy(&self.client, id))
                    .await
                    .map_err(|e| e.for_resource(S::DISPLAY_NAME, id))?;
            }
            Deletion::Disable(body) => {
                debug!(resource = S::TYPE_NAME, id, "disabling");
                ctx.run(S::remote_update(&self.client, id, &body))
                    .await
                    .map_err(|e| e.for_resource(S::DISPLAY_NAME, id))?;
            }
        }

        info!(resource = S::TYPE_NAME, id, "deleted");
        Ok(())
    }

    /// Seed a new instance from an identifier alone. Not-found fails the import.
    pub async fn import<H>(
        &self,
        hooks: &H,
        ctx: &CallContext,
        id: &str,
    ) -> Result<S::Model, CoreError>
    where
        H: ResourceHooks<S> + ?Sized,
    {
        if id.is_empty() {
            return Err(CoreError::validation("id", "an identifier is required to import"));
        }
        debug!(resource = S::TYPE_NAME, id, "importing");

        let snapshot = ctx
            .run(S::remote_retrieve(&self.client, id))
            .await
            .map_err(|e| e.for_resource(S::DISPLAY_NAME, id))?;
        let state = hooks.from_snapshot(self, snapshot, None)?;

        info!(resource = S::TYPE_NAME, id, "imported");
        Ok(state)
    }

    fn require_id(prior: &S::Model) -> Result<&str, CoreError> {
        S::id(prior).filter(|id| !id.is_empty()).ok_or_else(|| {
            CoreError::validation(
                "id",
                format!(
                    "the {} has no id in state; import it or create it first",
                    S::DISPLAY_NAME
                ),
            )
        })
    }
}

// ── Hooked resource ──────────────────────────────────────────────────

/// A resource type with its hooks resolved once, at construction.
pub struct Resource<S, H = NoHooks> {
    base: Reconciler<S>,
    hooks: H,
}

impl<S: ResourceSpec, H: ResourceHooks<S>> Resource<S, H> {
    pub fn new(client: VellumClient, hooks: H) -> Self {
        Self {
            base: Reconciler::new(client),
            hooks,
        }
    }

    pub fn schema(&self) -> Schema {
        self.hooks.schema(&self.base)
    }

    pub async fn create(
        &self,
        ctx: &CallContext,
        desired: &S::Model,
    ) -> Result<S::Model, CoreError> {
        self.hooks.create(&self.base, ctx, desired).await
    }

    pub async fn read(
        &self,
        ctx: &CallContext,
        prior: &S::Model,
    ) -> Result<ReadOutcome<S::Model>, CoreError> {
        self.hooks.read(&self.base, ctx, prior).await
    }

    pub async fn update(
        &self,
        ctx: &CallContext,
        desired: &S::Model,
        prior: &S::Model,
    ) -> Result<S::Model, CoreError> {
        self.hooks.update(&self.base, ctx, desired, prior).await
    }

    pub async fn delete(&self, ctx: &CallContext, prior: &S::Model) -> Result<(), CoreError> {
        self.hooks.delete(&self.base, ctx, prior).await
    }

    pub async fn import(&self, ctx: &CallContext, id: &str) -> Result<S::Model, CoreError> {
        self.hooks.import(&self.base, ctx, id).await
    }
}
