use std::str::FromStr;

use campusline_core::{AppError, AppResult, CallerIdentity, Role};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::EntityRecord;

/// Per-record access policy of visibility-bearing entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only headquarters can see the record.
    Private,
    /// Visible to the scopes named in the share lists.
    Shared,
    /// Visible to every role.
    Public,
}

impl Visibility {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Shared => "shared",
            Self::Public => "public",
        }
    }

    /// Parses a transport value into a visibility mode.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "private" => Ok(Self::Private),
            "shared" => Ok(Self::Shared),
            "public" => Ok(Self::Public),
            _ => Err(AppError::InvalidInput(format!(
                "unknown visibility '{value}', expected one of private, shared, public"
            ))),
        }
    }
}

/// Visibility rule of a collection: which share list each role is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityRule {
    master_franchise_share_field: &'static str,
    learning_center_share_field: &'static str,
}

impl VisibilityRule {
    /// Creates a rule from the MF-facing and LC-facing share-list field names.
    #[must_use]
    pub const fn new(
        master_franchise_share_field: &'static str,
        learning_center_share_field: &'static str,
    ) -> Self {
        Self {
            master_franchise_share_field,
            learning_center_share_field,
        }
    }

    /// Returns the share-list field checked for the role, if any.
    #[must_use]
    pub fn share_field_for(&self, role: Role) -> Option<&'static str> {
        match role {
            Role::MasterFranchise => Some(self.master_franchise_share_field),
            Role::LearningCenter => Some(self.learning_center_share_field),
            Role::Headquarters | Role::TeacherTrainer => None,
        }
    }

    /// Returns the visibility mode stored on the record.
    ///
    /// Missing or unrecognised values count as private.
    #[must_use]
    pub fn record_visibility(&self, record: &EntityRecord) -> Visibility {
        record
            .text_field("visibility")
            .and_then(|value| Visibility::from_str(value).ok())
            .unwrap_or(Visibility::Private)
    }

    /// Returns whether the caller may see the record.
    #[must_use]
    pub fn allows(&self, record: &EntityRecord, caller: &CallerIdentity) -> bool {
        if caller.role() == Role::Headquarters {
            return true;
        }

        match self.record_visibility(record) {
            Visibility::Public => true,
            Visibility::Private => false,
            Visibility::Shared => {
                let Some(share_field) = self.share_field_for(caller.role()) else {
                    return false;
                };
                let Some(scope) = caller.scope() else {
                    return false;
                };

                record
                    .data()
                    .get(share_field)
                    .and_then(Value::as_array)
                    .is_some_and(|shared_with| {
                        shared_with
                            .iter()
                            .any(|entry| entry.as_str() == Some(scope.as_str()))
                    })
            }
        }
    }

    /// Validates visibility fields present in a create or update payload.
    pub fn validate_payload(&self, payload: &Map<String, Value>) -> AppResult<()> {
        if let Some(visibility) = payload.get("visibility") {
            let value = visibility.as_str().ok_or_else(|| {
                AppError::InvalidInput("visibility must be a string".to_owned())
            })?;
            Visibility::parse_transport(value)?;
        }

        for share_field in [
            self.master_franchise_share_field,
            self.learning_center_share_field,
        ] {
            let Some(shared_with) = payload.get(share_field) else {
                continue;
            };

            let is_string_list = shared_with
                .as_array()
                .is_some_and(|entries| entries.iter().all(Value::is_string));
            if !is_string_list {
                return Err(AppError::InvalidInput(format!(
                    "{share_field} must be an array of scope identifiers"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use campusline_core::{CallerIdentity, Role, ScopeId};
    use chrono::Utc;
    use proptest::prelude::*;
    use serde_json::{Map, Value, json};

    use super::{Visibility, VisibilityRule};
    use crate::{EntityKind, EntityRecord, payload_object};

    fn rule() -> VisibilityRule {
        VisibilityRule::new("sharedWithMFs", "sharedWithLCs")
    }

    fn program(data: Value) -> EntityRecord {
        EntityRecord::new(
            "program-1",
            EntityKind::Program,
            payload_object(data).unwrap_or_default(),
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn caller(role: Role, scope: Option<&str>) -> CallerIdentity {
        CallerIdentity::new(
            role,
            scope.map(|value| ScopeId::new(value).unwrap_or_else(|_| unreachable!())),
        )
    }

    #[test]
    fn headquarters_sees_private_records() {
        let record = program(json!({"visibility": "private"}));
        assert!(rule().allows(&record, &caller(Role::Headquarters, None)));
    }

    #[test]
    fn shared_record_is_hidden_from_other_master_franchise() {
        let record = program(json!({"visibility": "shared", "sharedWithMFs": ["mf_1"]}));

        assert!(rule().allows(&record, &caller(Role::MasterFranchise, Some("mf_1"))));
        assert!(!rule().allows(&record, &caller(Role::MasterFranchise, Some("mf_2"))));
        assert!(!rule().allows(&record, &caller(Role::MasterFranchise, None)));
    }

    #[test]
    fn learning_center_checks_its_own_share_list() {
        let record = program(json!({
            "visibility": "shared",
            "sharedWithMFs": ["lc_1"],
            "sharedWithLCs": ["lc_2"]
        }));

        assert!(!rule().allows(&record, &caller(Role::LearningCenter, Some("lc_1"))));
        assert!(rule().allows(&record, &caller(Role::LearningCenter, Some("lc_2"))));
    }

    #[test]
    fn teacher_trainer_sees_public_only() {
        let shared = program(json!({"visibility": "shared", "sharedWithMFs": ["tt_1"]}));
        let public = program(json!({"visibility": "public"}));
        let tt = caller(Role::TeacherTrainer, Some("tt_1"));

        assert!(!rule().allows(&shared, &tt));
        assert!(rule().allows(&public, &tt));
    }

    #[test]
    fn missing_visibility_counts_as_private() {
        let record = program(json!({"name": "Untagged"}));
        assert_eq!(rule().record_visibility(&record), Visibility::Private);
        assert!(!rule().allows(&record, &caller(Role::MasterFranchise, Some("mf_1"))));
    }

    #[test]
    fn payload_validation_rejects_bad_visibility_fields() {
        let invalid_mode = payload_object(json!({"visibility": "secret"})).unwrap_or_default();
        assert!(rule().validate_payload(&invalid_mode).is_err());

        let invalid_list = payload_object(json!({"sharedWithLCs": "lc_1"})).unwrap_or_default();
        assert!(rule().validate_payload(&invalid_list).is_err());

        let valid = payload_object(json!({"visibility": "shared", "sharedWithMFs": ["mf_1"]}))
            .unwrap_or_default();
        assert!(rule().validate_payload(&valid).is_ok());
        assert!(rule().validate_payload(&Map::new()).is_ok());
    }

    fn visibility_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("private"), Just("shared"), Just("public"), Just("bogus")]
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Headquarters),
            Just(Role::MasterFranchise),
            Just(Role::LearningCenter),
            Just(Role::TeacherTrainer),
        ]
    }

    proptest! {
        #[test]
        fn visible_set_never_exceeds_headquarters_view(
            visibility in visibility_strategy(),
            mf_shares in proptest::collection::vec("s[0-3]", 0..3),
            lc_shares in proptest::collection::vec("s[0-3]", 0..3),
            role in role_strategy(),
            scope in proptest::option::of("s[0-3]"),
        ) {
            let record = program(json!({
                "visibility": visibility,
                "sharedWithMFs": mf_shares,
                "sharedWithLCs": lc_shares,
            }));
            let viewer = caller(role, scope.as_deref());

            prop_assert!(rule().allows(&record, &caller(Role::Headquarters, None)));
            if rule().allows(&record, &viewer) && role == Role::TeacherTrainer {
                prop_assert_eq!(visibility, "public");
            }
        }
    }
}
