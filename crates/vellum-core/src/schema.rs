// ── Schema descriptor ──
//
// Declares the shape of each resource and data source so the host can
// validate configuration before the reconciler runs, and so planned
// documents can be checked again right before any remote call.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::codec::{self, EnumKind};
use crate::diagnostics::{Diagnostic, Diagnostics};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrKind {
    String,
    /// Free-form JSON object.
    Json,
    /// Map of string to string.
    StringMap,
    List(Box<AttrKind>),
    Object(Vec<Attribute>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

impl Role {
    pub fn author_may_set(self) -> bool {
        !matches!(self, Self::Computed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    OneOf(EnumKind),
    LengthBetween(usize, usize),
}

impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::OneOf(kind) => map.serialize_entry("one_of", &kind.tokens())?,
            Self::LengthBetween(min, max) => map.serialize_entry("length_between", &[min, max])?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttrKind,
    pub role: Role,
    pub description: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(name: &'static str, kind: AttrKind, role: Role) -> Self {
        Self {
            name,
            kind,
            role,
            description: "",
            sensitive: false,
            requires_replace: false,
            validators: Vec::new(),
        }
    }

    pub fn string(name: &'static str, role: Role) -> Self {
        Self::new(name, AttrKind::String, role)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn one_of(mut self, kind: EnumKind) -> Self {
        self.validators.push(Validator::OneOf(kind));
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.validators.push(Validator::LengthBetween(min, max));
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Which document is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Author configuration: computed-only attributes must be unset.
    Config,
    /// Planned state: may carry computed values from prior state.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes whose change cannot be applied in place.
    pub fn replace_triggers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|a| a.requires_replace)
            .map(|a| a.name)
    }

    pub fn validate(&self, document: &Value, mode: ValidationMode) -> Diagnostics {
        let mut diags = Diagnostics::new();
        validate_object(&self.attributes, document, mode, "", &mut diags);
        diags
    }
}

// ── Validation ───────────────────────────────────────────────────────

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_object(
    attributes: &[Attribute],
    document: &Value,
    mode: ValidationMode,
    prefix: &str,
    diags: &mut Diagnostics,
) {
    let Some(fields) = document.as_object() else {
        let at = if prefix.is_empty() { "<root>" } else { prefix };
        diags.push(
            Diagnostic::error("Incorrect attribute value type", "expected an object").at(at),
        );
        return;
    };

    for key in fields.keys() {
        if !attributes.iter().any(|a| a.name == key) {
            diags.push(
                Diagnostic::error(
                    "Unsupported argument",
                    format!("An argument named \"{key}\" is not expected here."),
                )
                .at(join(prefix, key)),
            );
        }
    }

    for attribute in attributes {
        let path = join(prefix, attribute.name);
        let value = fields.get(attribute.name).filter(|v| !v.is_null());
        match (value, attribute.role) {
            (None, Role::Required) => diags.push(
                Diagnostic::error(
                    "Missing required argument",
                    format!("The argument \"{path}\" is required, but no definition was found."),
                )
                .at(path),
            ),
            (Some(_), role) if mode == ValidationMode::Config && !role.author_may_set() => {
                diags.push(
                    Diagnostic::error(
                        "Invalid configuration",
                        format!("\"{path}\" is computed by Vellum and cannot be set."),
                    )
                    .at(path),
                );
            }
            (Some(value), _) => {
                validate_value(&attribute.kind, &attribute.validators, value, mode, &path, diags);
            }
            (None, _) => {}
        }
    }
}

fn validate_value(
    kind: &AttrKind,
    validators: &[Validator],
    value: &Value,
    mode: ValidationMode,
    path: &str,
    diags: &mut Diagnostics,
) {
    match kind {
        AttrKind::String => match value.as_str() {
            Some(text) => validate_string(validators, text, path, diags),
            None => diags.push(type_error(path, "a string")),
        },
        AttrKind::Json => {
            if !value.is_object() {
                diags.push(type_error(path, "a JSON object"));
            }
        }
        AttrKind::StringMap => match value.as_object() {
            Some(entries) => {
                for (key, entry) in entries {
                    if !entry.is_string() {
                        diags.push(type_error(&join(path, key), "a string"));
                    }
                }
            }
            None => diags.push(type_error(path, "a map of strings")),
        },
        AttrKind::List(inner) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_value(inner, validators, item, mode, &format!("{path}[{i}]"), diags);
                }
            }
            None => diags.push(type_error(path, "a list")),
        },
        AttrKind::Object(attributes) => validate_object(attributes, value, mode, path, diags),
    }
}

fn validate_string(validators: &[Validator], text: &str, path: &str, diags: &mut Diagnostics) {
    for validator in validators {
        match validator {
            Validator::OneOf(kind) => {
                if let Err(err) = codec::decode(*kind, text) {
                    diags.push(
                        Diagnostic::error("Invalid attribute value", err.to_string()).at(path),
                    );
                }
            }
            Validator::LengthBetween(min, max) => {
                let len = text.chars().count();
                if len < *min || len > *max {
                    diags.push(
                        Diagnostic::error(
                            "Invalid attribute value length",
                            format!(
                                "Attribute {path} string length must be between \
                                 {min} and {max}, got: {len}"
                            ),
                        )
                        .at(path),
                    );
                }
            }
        }
    }
}

fn type_error(path: &str, expected: &str) -> Diagnostic {
    Diagnostic::error(
        "Incorrect attribute value type",
        format!("Attribute {path} must be {expected}."),
    )
    .at(path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema {
            description: "test",
            attributes: vec![
                Attribute::string("id", Role::Computed),
                Attribute::string("name", Role::Required).length(1, 5),
                Attribute::string("status", Role::OptionalComputed).one_of(EnumKind::EntityStatus),
                Attribute::new(
                    "exec_config",
                    AttrKind::Object(vec![
                        Attribute::new("metadata", AttrKind::StringMap, Role::Optional),
                        Attribute::new(
                            "features",
                            AttrKind::List(Box::new(AttrKind::String)),
                            Role::Optional,
                        )
                        .one_of(EnumKind::ModelFeature),
                    ]),
                    Role::Optional,
                ),
            ],
        }
    }

    fn attributes(diags: &Diagnostics) -> Vec<String> {
        diags.iter().filter_map(|d| d.attribute.clone()).collect()
    }

    #[test]
    fn valid_config_passes() {
        let doc = json!({
            "name": "docs",
            "status": "ACTIVE",
            "exec_config": { "metadata": { "a": "1" }, "features": ["TEXT"] }
        });
        assert!(schema().validate(&doc, ValidationMode::Config).is_empty());
    }

    #[test]
    fn required_and_computed_rules() {
        let doc = json!({ "id": "x" });
        let diags = schema().validate(&doc, ValidationMode::Config);
        assert_eq!(attributes(&diags), vec!["id", "name"]);

        let planned = json!({ "id": "x", "name": "docs" });
        assert!(!schema().validate(&planned, ValidationMode::Planned).has_error());
    }

    #[test]
    fn length_and_token_checks() {
        let doc = json!({ "name": "", "status": "GONE" });
        let diags = schema().validate(&doc, ValidationMode::Config);
        assert_eq!(attributes(&diags), vec!["name", "status"]);

        let long = json!({ "name": "toolong" });
        assert!(schema().validate(&long, ValidationMode::Config).has_error());
    }

    #[test]
    fn nested_paths_are_reported() {
        let doc = json!({
            "name": "docs",
            "exec_config": {
                "metadata": { "a": 1 },
                "features": ["TEXT", "TELEPATHY"],
                "extra": true
            }
        });
        let diags = schema().validate(&doc, ValidationMode::Config);
        assert_eq!(
            attributes(&diags),
            vec!["exec_config.extra", "exec_config.metadata.a", "exec_config.features[1]"]
        );
    }

    #[test]
    fn null_counts_as_unset() {
        let doc = json!({ "name": "docs", "status": null, "id": null });
        assert!(schema().validate(&doc, ValidationMode::Config).is_empty());
    }

    #[test]
    fn non_object_document_is_rejected() {
        let diags = schema().validate(&json!([1]), ValidationMode::Config);
        assert!(diags.has_error());
    }
}
