// ── ML model transcoder ──

use serde_json::Value;
use vellum_api::Patch;
use vellum_api::types::{
    MlModelCreateRequest, MlModelExecConfig, MlModelRead, PatchedMlModelUpdateRequest,
};

use super::{changed, ensure_unchanged, required_enum};
use crate::codec::WireEnum;
use crate::error::CoreError;
use crate::model::{
    ExecConfig, HostedBy, MlModel, MlModelData, ModelDeveloper, ModelFamily, ModelFeature,
    Visibility,
};

const RESOURCE: &str = "ML model";

pub fn to_create_request(desired: &MlModel) -> Result<MlModelCreateRequest, CoreError> {
    if desired.exec_config.model_identifier.is_empty() {
        return Err(CoreError::validation(
            "exec_config.model_identifier",
            "must not be empty",
        ));
    }

    Ok(MlModelCreateRequest {
        name: desired.name.clone(),
        visibility: Some(desired.visibility.token().to_owned()),
        hosted_by: desired.hosted_by.token().to_owned(),
        developed_by: desired.developed_by.token().to_owned(),
        family: desired.family.token().to_owned(),
        exec_config: MlModelExecConfig {
            model_identifier: desired.exec_config.model_identifier.clone(),
            base_url: desired.exec_config.base_url.clone(),
            metadata: desired
                .exec_config
                .metadata
                .iter()
                .map(|(key, raw)| (key.clone(), metadata_value(raw)))
                .collect(),
            features: desired
                .exec_config
                .features
                .iter()
                .map(|f| f.token().to_owned())
                .collect(),
        },
    })
}

/// Only visibility is mutable; every other field forces a replacement.
pub fn to_partial_update_request(
    desired: &MlModel,
    prior: &MlModel,
) -> Result<PatchedMlModelUpdateRequest, CoreError> {
    ensure_unchanged("name", Some(&desired.name), Some(&prior.name))?;
    ensure_unchanged("hosted_by", Some(&desired.hosted_by), Some(&prior.hosted_by))?;
    ensure_unchanged(
        "developed_by",
        Some(&desired.developed_by),
        Some(&prior.developed_by),
    )?;
    ensure_unchanged("family", Some(&desired.family), Some(&prior.family))?;
    ensure_unchanged(
        "exec_config",
        Some(&desired.exec_config),
        Some(&prior.exec_config),
    )?;

    Ok(PatchedMlModelUpdateRequest {
        visibility: changed(Some(&desired.visibility), Some(&prior.visibility))
            .map(|v| v.token().to_owned()),
    })
}

/// ML models cannot be hard-deleted; they are retired by disabling them.
pub fn disable_request() -> PatchedMlModelUpdateRequest {
    PatchedMlModelUpdateRequest {
        visibility: Patch::Set(Visibility::Disabled.token().to_owned()),
    }
}

/// `prior` keeps the author's metadata text where it still means the same value.
pub fn from_snapshot(snapshot: MlModelRead, prior: Option<&MlModel>) -> Result<MlModel, CoreError> {
    let visibility: Visibility = required_enum(RESOURCE, "visibility", snapshot.visibility)?;

    Ok(MlModel {
        id: Some(snapshot.id),
        name: snapshot.name,
        visibility,
        hosted_by: HostedBy::decode(&snapshot.hosted_by)?,
        developed_by: ModelDeveloper::decode(&snapshot.developed_by.value)?,
        family: ModelFamily::decode(&snapshot.family.value)?,
        exec_config: ExecConfig {
            model_identifier: snapshot.exec_config.model_identifier,
            base_url: snapshot.exec_config.base_url,
            metadata: snapshot
                .exec_config
                .metadata
                .into_iter()
                .map(|(key, value)| {
                    let authored = prior.and_then(|p| p.exec_config.metadata.get(&key));
                    let text = match authored {
                        Some(raw) if metadata_value(raw) == value => raw.clone(),
                        _ => metadata_text(value),
                    };
                    (key, text)
                })
                .collect(),
            features: snapshot
                .exec_config
                .features
                .iter()
                .map(|token| ModelFeature::decode(token))
                .collect::<Result<_, _>>()?,
        },
    })
}

pub fn data_from_snapshot(snapshot: MlModelRead) -> Result<MlModelData, CoreError> {
    let visibility: Visibility = required_enum(RESOURCE, "visibility", snapshot.visibility)?;

    Ok(MlModelData {
        id: Some(snapshot.id),
        name: Some(snapshot.name),
        visibility: Some(visibility),
        hosted_by: Some(HostedBy::decode(&snapshot.hosted_by)?),
        developed_by: Some(ModelDeveloper::decode(&snapshot.developed_by.value)?),
        family: Some(ModelFamily::decode(&snapshot.family.value)?),
    })
}

// ── Metadata values ──────────────────────────────────────────────────

/// Metadata is authored as strings; anything that parses as JSON is sent as JSON.
fn metadata_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn metadata_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_api::types::LabelledValue;

    use super::*;

    fn desired() -> MlModel {
        MlModel {
            id: None,
            name: "my-gpt".into(),
            visibility: Visibility::Private,
            hosted_by: HostedBy::Openai,
            developed_by: ModelDeveloper::Openai,
            family: ModelFamily::ChatGpt,
            exec_config: ExecConfig {
                model_identifier: "gpt-4o".into(),
                base_url: "https://api.openai.com/v1".into(),
                metadata: BTreeMap::from([
                    ("max_tokens".to_owned(), "4096".to_owned()),
                    ("tier".to_owned(), "premium".to_owned()),
                    ("stop".to_owned(), r#"["\n"]"#.to_owned()),
                ]),
                features: vec![ModelFeature::Text, ModelFeature::Chat],
            },
        }
    }

    fn echo(request: &MlModelCreateRequest) -> MlModelRead {
        MlModelRead {
            id: "mdl-1".into(),
            name: request.name.clone(),
            visibility: request.visibility.clone(),
            hosted_by: request.hosted_by.clone(),
            developed_by: LabelledValue {
                value: request.developed_by.clone(),
                label: Some("OpenAI".into()),
            },
            family: LabelledValue {
                value: request.family.clone(),
                label: None,
            },
            exec_config: request.exec_config.clone(),
        }
    }

    #[test]
    fn metadata_json_is_parsed_with_string_fallback() {
        let request = to_create_request(&desired()).unwrap();
        let metadata = &request.exec_config.metadata;
        assert_eq!(metadata["max_tokens"], json!(4096));
        assert_eq!(metadata["tier"], json!("premium"));
        assert_eq!(metadata["stop"], json!(["\n"]));
        assert_eq!(request.exec_config.features, vec!["TEXT", "CHAT"]);
    }

    #[test]
    fn author_fields_survive_create_round_trip() {
        let model = desired();
        let request = to_create_request(&model).unwrap();
        let state = from_snapshot(echo(&request), Some(&model)).unwrap();

        assert_eq!(state.id.as_deref(), Some("mdl-1"));
        assert_eq!(MlModel { id: None, ..state }, model);
    }

    #[test]
    fn authored_metadata_text_is_kept_when_equivalent() {
        let mut model = desired();
        model.exec_config.metadata = BTreeMap::from([
            ("cfg".to_owned(), r#"{"a": 1}"#.to_owned()),
            ("n".to_owned(), "1e3".to_owned()),
            ("q".to_owned(), r#""x""#.to_owned()),
            ("spaced".to_owned(), " [1, 2] ".to_owned()),
        ]);

        let request = to_create_request(&model).unwrap();
        let state = from_snapshot(echo(&request), Some(&model)).unwrap();
        assert_eq!(state.exec_config.metadata, model.exec_config.metadata);
    }

    #[test]
    fn remote_metadata_changes_are_rendered_as_json() {
        let model = desired();
        let request = to_create_request(&model).unwrap();
        let mut snapshot = echo(&request);
        snapshot
            .exec_config
            .metadata
            .insert("max_tokens".into(), json!(8192));
        snapshot
            .exec_config
            .metadata
            .insert("extra".into(), json!({ "k": true }));

        let state = from_snapshot(snapshot, Some(&model)).unwrap();
        let metadata = &state.exec_config.metadata;
        assert_eq!(metadata["max_tokens"], "8192");
        assert_eq!(metadata["extra"], r#"{"k":true}"#);
        assert_eq!(metadata["tier"], "premium");

        let imported = from_snapshot(echo(&request), None).unwrap();
        assert_eq!(imported.exec_config.metadata["stop"], r#"["\n"]"#);
    }

    #[test]
    fn visibility_is_the_only_mutable_field() {
        let prior = MlModel {
            id: Some("mdl-1".into()),
            ..desired()
        };
        let wanted = MlModel {
            visibility: Visibility::Public,
            ..prior.clone()
        };
        let patch = to_partial_update_request(&wanted, &prior).unwrap();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "visibility": "PUBLIC" })
        );

        let unchanged = to_partial_update_request(&prior, &prior).unwrap();
        assert_eq!(serde_json::to_value(&unchanged).unwrap(), json!({}));

        let refamilied = MlModel {
            family: ModelFamily::Gemini,
            ..prior.clone()
        };
        assert_eq!(
            to_partial_update_request(&refamilied, &prior)
                .unwrap_err()
                .attribute(),
            Some("family")
        );
    }

    #[test]
    fn disable_request_sets_disabled() {
        assert_eq!(
            serde_json::to_value(disable_request()).unwrap(),
            json!({ "visibility": "DISABLED" })
        );
    }

    #[test]
    fn missing_visibility_is_an_integrity_error() {
        let mut snapshot = echo(&to_create_request(&desired()).unwrap());
        snapshot.visibility = None;
        assert!(matches!(
            from_snapshot(snapshot, None),
            Err(CoreError::DataIntegrity {
                field: "visibility",
                ..
            })
        ));
    }

    #[test]
    fn unknown_feature_is_rejected() {
        let mut snapshot = echo(&to_create_request(&desired()).unwrap());
        snapshot.exec_config.features.push("TELEPATHY".into());
        assert!(matches!(
            from_snapshot(snapshot, None),
            Err(CoreError::InvalidEnumValue(_))
        ));
    }

    #[test]
    fn empty_model_identifier_is_rejected() {
        let mut model = desired();
        model.exec_config.model_identifier.clear();
        assert!(to_create_request(&model).is_err());
    }
}
