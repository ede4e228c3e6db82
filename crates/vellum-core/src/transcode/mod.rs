// ── Resource transcoders ──
//
// Pure mappings between declarative models and Vellum wire shapes, one
// module per resource type. No I/O happens here.

pub mod document_index;
pub mod ml_model;

use vellum_api::Patch;

use crate::codec::WireEnum;
use crate::error::CoreError;

/// `Set` only when the author gave a value that differs from prior state.
pub(crate) fn changed<T: PartialEq + Clone>(desired: Option<&T>, prior: Option<&T>) -> Patch<T> {
    match desired {
        Some(value) if prior != Some(value) => Patch::Set(value.clone()),
        _ => Patch::Absent,
    }
}

/// Fields the API cannot change in place must match prior state.
pub(crate) fn ensure_unchanged<T: PartialEq>(
    attribute: &str,
    desired: Option<&T>,
    prior: Option<&T>,
) -> Result<(), CoreError> {
    match desired {
        Some(value) if prior != Some(value) => Err(CoreError::validation(
            attribute,
            "cannot be changed in place; the resource must be replaced",
        )),
        _ => Ok(()),
    }
}

/// Decode an enum the model declares non-nullable. A missing token is an
/// integrity failure, not an empty value.
pub(crate) fn required_enum<E: WireEnum>(
    resource: &'static str,
    field: &'static str,
    token: Option<String>,
) -> Result<E, CoreError> {
    let token = token.ok_or(CoreError::DataIntegrity { resource, field })?;
    Ok(E::decode(&token)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::EntityStatus;

    #[test]
    fn changed_requires_explicit_and_different() {
        assert_eq!(changed(Some(&1), Some(&2)), Patch::Set(1));
        assert!(changed(Some(&1), Some(&1)).is_absent());
        assert!(changed(None, Some(&1)).is_absent());
        assert_eq!(changed(Some(&1), None), Patch::Set(1));
    }

    #[test]
    fn ensure_unchanged_ignores_unset() {
        assert!(ensure_unchanged("name", None, Some(&"a")).is_ok());
        assert!(ensure_unchanged("name", Some(&"a"), Some(&"a")).is_ok());
        assert!(ensure_unchanged("name", Some(&"b"), Some(&"a")).is_err());
    }

    #[test]
    fn required_enum_distinguishes_missing_from_unknown() {
        let missing = required_enum::<EntityStatus>("document index", "status", None);
        assert!(matches!(missing, Err(CoreError::DataIntegrity { field: "status", .. })));

        let unknown =
            required_enum::<EntityStatus>("document index", "status", Some("GONE".into()));
        assert!(matches!(unknown, Err(CoreError::InvalidEnumValue(_))));

        let ok = required_enum::<EntityStatus>("document index", "status", Some("ACTIVE".into()));
        assert_eq!(ok.unwrap(), EntityStatus::Active);
    }
}
