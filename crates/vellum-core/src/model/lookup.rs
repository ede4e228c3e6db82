use crate::error::CoreError;

/// The single key a data source lookup goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(String),
    Name(String),
}

impl LookupKey {
    /// Exactly one of `id` / `name` must be set. Empty strings count as unset.
    pub fn resolve(
        resource: &'static str,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self, CoreError> {
        let id = id.filter(|s| !s.is_empty());
        let name = name.filter(|s| !s.is_empty());
        match (id, name) {
            (Some(_), Some(_)) => Err(CoreError::AmbiguousLookup { resource }),
            (None, None) => Err(CoreError::MissingLookup { resource }),
            (Some(id), None) => Ok(Self::Id(id.to_owned())),
            (None, Some(name)) => Ok(Self::Name(name.to_owned())),
        }
    }

    /// Path segment for the retrieve call, which accepts either form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(v) | Self::Name(v) => v,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_key() {
        assert_eq!(
            LookupKey::resolve("ml model", Some("m-1"), None).unwrap(),
            LookupKey::Id("m-1".into())
        );
        assert_eq!(
            LookupKey::resolve("ml model", None, Some("gpt")).unwrap(),
            LookupKey::Name("gpt".into())
        );
    }

    #[test]
    fn both_or_neither_is_rejected() {
        assert!(matches!(
            LookupKey::resolve("ml model", Some("m-1"), Some("gpt")),
            Err(CoreError::AmbiguousLookup { .. })
        ));
        assert!(matches!(
            LookupKey::resolve("ml model", None, None),
            Err(CoreError::MissingLookup { .. })
        ));
        assert!(matches!(
            LookupKey::resolve("ml model", Some(""), None),
            Err(CoreError::MissingLookup { .. })
        ));
    }
}
