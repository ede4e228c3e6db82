// Tri-state field for sparse PATCH documents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One field of a partial-update document.
///
/// `Absent` keys are dropped from the JSON body entirely, `Null` keys are
/// sent as `null`, and `Set` keys carry a value. Pair every field with
/// `#[serde(default, skip_serializing_if = "Patch::is_absent")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Null => Patch::Null,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Absent is normally skipped by the container; if not, it degrades to null.
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Null,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        label: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        status: Patch<String>,
    }

    #[test]
    fn absent_and_null_serialize_differently() {
        let absent = Doc::default();
        let cleared = Doc {
            label: Patch::Null,
            ..Doc::default()
        };

        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({ "label": null }));
    }

    #[test]
    fn set_serializes_value() {
        let doc = Doc {
            status: Patch::Set("ARCHIVED".into()),
            ..Doc::default()
        };
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "status": "ARCHIVED" })
        );
    }

    #[test]
    fn deserialize_keeps_three_states() {
        let doc: Doc =
            serde_json::from_value(json!({ "label": null, "status": "ACTIVE" })).unwrap();
        assert_eq!(doc.label, Patch::Null);
        assert_eq!(doc.status, Patch::Set("ACTIVE".to_owned()));

        let empty: Doc = serde_json::from_value(json!({})).unwrap();
        assert!(empty.label.is_absent());
    }

    #[test]
    fn map_preserves_state() {
        assert_eq!(Patch::Set(2).map(|v| v * 2), Patch::Set(4));
        assert_eq!(Patch::<i32>::Null.map(|v| v * 2), Patch::Null);
        assert!(Patch::<i32>::Absent.map(|v| v * 2).is_absent());
    }
}
