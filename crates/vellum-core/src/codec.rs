// ── Enum/value codec ──
//
// Every closed enumeration on the wire goes through here. Token tables are
// fixed at compile time (strum derives on the enums in `model::enums`), and
// decoding fails closed: an unknown token is an error, never a fallback.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::model::enums::{
    EntityStatus, Environment, HostedBy, ModelDeveloper, ModelFamily, ModelFeature, Visibility,
};

/// Names each closed token set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    #[strum(serialize = "status")]
    EntityStatus,
    #[strum(serialize = "environment")]
    Environment,
    #[strum(serialize = "visibility")]
    Visibility,
    #[strum(serialize = "hosted_by")]
    HostedBy,
    #[strum(serialize = "developed_by")]
    ModelDeveloper,
    #[strum(serialize = "family")]
    ModelFamily,
    #[strum(serialize = "feature")]
    ModelFeature,
}

impl EnumKind {
    /// The valid tokens, in declaration order.
    pub fn tokens(self) -> Vec<&'static str> {
        match self {
            Self::EntityStatus => EntityStatus::tokens(),
            Self::Environment => Environment::tokens(),
            Self::Visibility => Visibility::tokens(),
            Self::HostedBy => HostedBy::tokens(),
            Self::ModelDeveloper => ModelDeveloper::tokens(),
            Self::ModelFamily => ModelFamily::tokens(),
            Self::ModelFeature => ModelFeature::tokens(),
        }
    }
}

/// A token outside the closed set for its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value {token:?}; expected one of: {}", .kind.tokens().join(", "))]
pub struct CodecError {
    pub kind: EnumKind,
    pub token: String,
}

/// A closed enumeration with a fixed wire-token table.
pub trait WireEnum:
    Copy + Eq + Into<&'static str> + FromStr + IntoEnumIterator + 'static
{
    const KIND: EnumKind;

    fn token(self) -> &'static str {
        self.into()
    }

    fn decode(token: &str) -> Result<Self, CodecError> {
        token.parse().map_err(|_| CodecError {
            kind: Self::KIND,
            token: token.to_owned(),
        })
    }

    fn tokens() -> Vec<&'static str> {
        Self::iter().map(Into::into).collect()
    }
}

/// Any decoded enumeration value, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    EntityStatus(EntityStatus),
    Environment(Environment),
    Visibility(Visibility),
    HostedBy(HostedBy),
    ModelDeveloper(ModelDeveloper),
    ModelFamily(ModelFamily),
    ModelFeature(ModelFeature),
}

impl EnumValue {
    pub fn kind(self) -> EnumKind {
        match self {
            Self::EntityStatus(_) => EnumKind::EntityStatus,
            Self::Environment(_) => EnumKind::Environment,
            Self::Visibility(_) => EnumKind::Visibility,
            Self::HostedBy(_) => EnumKind::HostedBy,
            Self::ModelDeveloper(_) => EnumKind::ModelDeveloper,
            Self::ModelFamily(_) => EnumKind::ModelFamily,
            Self::ModelFeature(_) => EnumKind::ModelFeature,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(encode(*self))
    }
}

/// Decode `token` as a value of `kind`.
pub fn decode(kind: EnumKind, token: &str) -> Result<EnumValue, CodecError> {
    Ok(match kind {
        EnumKind::EntityStatus => EnumValue::EntityStatus(EntityStatus::decode(token)?),
        EnumKind::Environment => EnumValue::Environment(Environment::decode(token)?),
        EnumKind::Visibility => EnumValue::Visibility(Visibility::decode(token)?),
        EnumKind::HostedBy => EnumValue::HostedBy(HostedBy::decode(token)?),
        EnumKind::ModelDeveloper => EnumValue::ModelDeveloper(ModelDeveloper::decode(token)?),
        EnumKind::ModelFamily => EnumValue::ModelFamily(ModelFamily::decode(token)?),
        EnumKind::ModelFeature => EnumValue::ModelFeature(ModelFeature::decode(token)?),
    })
}

/// Encode a value back to its wire token.
pub fn encode(value: EnumValue) -> &'static str {
    match value {
        EnumValue::EntityStatus(v) => v.token(),
        EnumValue::Environment(v) => v.token(),
        EnumValue::Visibility(v) => v.token(),
        EnumValue::HostedBy(v) => v.token(),
        EnumValue::ModelDeveloper(v) => v.token(),
        EnumValue::ModelFamily(v) => v.token(),
        EnumValue::ModelFeature(v) => v.token(),
    }
}
