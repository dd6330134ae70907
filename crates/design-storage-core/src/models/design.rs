//! Design domain model.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DesignError, DesignResult};

/// The modifications a design describes. Entries are opaque to this service;
/// their shape is owned by the clients that produce them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignContent {
    #[serde(default)]
    pub reaction_knockins: Vec<serde_json::Value>,
    #[serde(default)]
    pub reaction_knockouts: Vec<serde_json::Value>,
    #[serde(default)]
    pub gene_knockouts: Vec<serde_json::Value>,
    #[serde(default)]
    pub constraints: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: i64,
    /// Owning project. `None` marks a public design.
    pub project_id: Option<i64>,
    pub name: String,
    pub model_id: i64,
    pub design: DesignContent,
    pub method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New design. An `id` in the payload is accepted and ignored; the
/// repository assigns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDesign {
    pub project_id: Option<i64>,
    pub name: String,
    pub model_id: i64,
    pub design: DesignContent,
    pub method: String,
    #[serde(default, rename = "id", skip_serializing)]
    pub echoed_id: Option<IgnoredAny>,
}

impl CreateDesign {
    pub fn validate(&self) -> DesignResult<()> {
        validate_name(&self.name)
    }
}

/// Partial update. Absent fields keep their stored value.
///
/// `project_id` is tri-state: absent keeps the owner, `null` makes the design
/// public, an integer moves it to that project. An `id` is accepted so a
/// fetched design can be sent back, but it never changes the stored id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDesign {
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, rename = "id", skip_serializing)]
    pub echoed_id: Option<IgnoredAny>,
}

impl UpdateDesign {
    pub fn validate(&self) -> DesignResult<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Destination project when the update moves the design away from
    /// `current`.
    pub fn moves_from(&self, current: Option<i64>) -> Option<Option<i64>> {
        self.project_id.filter(|target| *target != current)
    }
}

fn validate_name(name: &str) -> DesignResult<()> {
    if name.trim().is_empty() {
        return Err(DesignError::validation("name must not be empty"));
    }
    Ok(())
}

/// Distinguishes an explicit `null` from an absent key: a present key always
/// yields `Some`, with `Some(None)` for `null`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_name() {
        let input = CreateDesign {
            project_id: Some(1),
            name: "   ".into(),
            model_id: 1,
            design: DesignContent::default(),
            method: "Manual".into(),
            ..Default::default()
        };
        assert!(matches!(
            input.validate(),
            Err(DesignError::Validation { .. })
        ));
    }

    #[test]
    fn create_ignores_id_but_rejects_unknown_fields() {
        let with_id = r#"{"id": 4, "project_id": 1, "name": "X", "model_id": 1,
                          "design": {}, "method": "Manual"}"#;
        let input: CreateDesign = serde_json::from_str(with_id).unwrap();
        assert_eq!(input.name, "X");

        let unknown = r#"{"owner": 4, "project_id": 1, "name": "X", "model_id": 1,
                          "design": {}, "method": "Manual"}"#;
        assert!(serde_json::from_str::<CreateDesign>(unknown).is_err());
    }

    #[test]
    fn content_rejects_unknown_keys() {
        assert!(serde_json::from_str::<DesignContent>(r#"{"pathways": []}"#).is_err());
    }

    #[test]
    fn update_distinguishes_absent_and_null_project() {
        let absent: UpdateDesign = serde_json::from_str(r#"{"name": "n"}"#).unwrap();
        assert_eq!(absent.project_id, None);

        let null: UpdateDesign = serde_json::from_str(r#"{"project_id": null}"#).unwrap();
        assert_eq!(null.project_id, Some(None));

        let moved: UpdateDesign = serde_json::from_str(r#"{"project_id": 5}"#).unwrap();
        assert_eq!(moved.project_id, Some(Some(5)));
    }

    #[test]
    fn update_ignores_id_field() {
        let update: UpdateDesign = serde_json::from_str(r#"{"id": 4, "name": "x"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("x"));
        assert_eq!(update.project_id, None);

        let echoed = serde_json::to_value(&update).unwrap();
        assert!(echoed.get("id").is_none());
    }

    #[test]
    fn update_rejects_unknown_field() {
        assert!(serde_json::from_str::<UpdateDesign>(r#"{"owner": 4, "name": "x"}"#).is_err());
    }

    #[test]
    fn moves_from_ignores_same_project() {
        let update = UpdateDesign {
            project_id: Some(Some(1)),
            ..Default::default()
        };
        assert_eq!(update.moves_from(Some(1)), None);
        assert_eq!(update.moves_from(Some(2)), Some(Some(1)));
        assert_eq!(update.moves_from(None), Some(Some(1)));
        assert_eq!(UpdateDesign::default().moves_from(Some(1)), None);
    }
}
