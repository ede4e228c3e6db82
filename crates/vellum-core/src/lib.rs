//! Lifecycle engine for managing Vellum platform resources declaratively.
//!
//! The host (an infrastructure-as-code engine, or the `vellum` CLI) owns
//! desired configuration and recorded state; this crate turns the two into
//! the minimal set of remote calls and reports back new state plus
//! diagnostics:
//!
//! - **[`Reconciler`]**: Generic create / read / update / delete / import
//!   flow over any [`ResourceSpec`]. Transcodes models to wire requests,
//!   sends only changed fields on update, and maps remote outcomes onto
//!   the error taxonomy in [`CoreError`].
//!
//! - **[`hooks`]**: Per-type overrides layered on top of the generic
//!   flow. The document index uses one to inject its default indexing
//!   configuration on create.
//!
//! - **[`Provider`]**: Registry of resource and data source types behind
//!   object-safe [`ManagedResource`] / [`ManagedDataSource`] traits that
//!   speak JSON documents and return a [`Response`] for every call.
//!
//! - **[`codec`]**: Bidirectional mapping between typed enums and the
//!   platform's string tokens, with the valid token list carried in errors.
//!
//! - **[`schema`]**: Static attribute descriptors and document validation.

pub mod codec;
pub mod config;
pub mod context;
pub mod data_source;
pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod resources;
pub mod schema;
pub mod transcode;

// ── Primary re-exports ──────────────────────────────────────────────
pub use codec::{CodecError, EnumKind, EnumValue, WireEnum};
pub use config::ClientConfig;
pub use context::CallContext;
pub use data_source::{DataSource, DataSourceReader, DataSourceSpec};
pub use diagnostics::{Diagnostic, Diagnostics, Operation, Severity};
pub use error::{CoreError, ErrorClass};
pub use hooks::{DataSourceHooks, DocumentIndexHooks, NoHooks, ResourceHooks};
pub use provider::{ManagedDataSource, ManagedResource, Provider, ProviderSchema, Response};
pub use reconcile::{Deletion, ReadOutcome, Reconciler, Resource, ResourceSpec};
pub use resources::{
    DocumentIndexDataSource, DocumentIndexResource, MlModelDataSource, MlModelResource,
};
pub use schema::{Attribute, AttrKind, Role, Schema, ValidationMode, Validator};

pub use model::{
    DocumentIndex, DocumentIndexData, EntityStatus, Environment, ExecConfig, HostedBy, LookupKey,
    MlModel, MlModelData, ModelDeveloper, ModelFamily, ModelFeature, Timestamp, Visibility,
};
