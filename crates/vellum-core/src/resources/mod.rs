// ── Resource and data source types ──
//
// Binds each model to its schema, transcoder and endpoints.

pub mod document_index;
pub mod ml_model;

pub use document_index::{DocumentIndexDataSource, DocumentIndexResource};
pub use ml_model::{MlModelDataSource, MlModelResource};
