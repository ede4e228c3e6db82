// ── Declarative models ──
//
// What a host stores in state for each resource and data source type.
// `None` on an optional field means the author left it unset.

pub mod document_index;
pub mod enums;
pub mod lookup;
pub mod ml_model;
pub mod timestamp;

pub use document_index::{DocumentIndex, DocumentIndexData};
pub use enums::{
    EntityStatus, Environment, HostedBy, ModelDeveloper, ModelFamily, ModelFeature, Visibility,
};
pub use lookup::LookupKey;
pub use ml_model::{ExecConfig, MlModel, MlModelData};
pub use timestamp::Timestamp;
