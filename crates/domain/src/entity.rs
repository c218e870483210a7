use std::fmt::{Display, Formatter};
use std::str::FromStr;

use campusline_core::{AppError, AppResult};

use crate::VisibilityRule;

/// Entity collections managed by the administration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Headquarters-authored education program.
    Program,
    /// Master-franchise adaptation of a program.
    SubProgram,
    /// Class cohort run by a learning center.
    LearningGroup,
    /// Teacher profile.
    Teacher,
    /// Student profile.
    Student,
    /// Sellable product or material.
    Product,
    /// Product order.
    Order,
    /// Teacher training session.
    Training,
    /// Franchise or teacher application.
    Application,
    /// Organizational account.
    Account,
}

/// Static per-collection declarations that drive querying and visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Fields matched by free-text search.
    pub searchable_fields: &'static [&'static str],
    /// Fields accepted as exact-match filters.
    pub filterable_fields: &'static [&'static str],
    /// Visibility rule for visibility-bearing collections.
    pub visibility: Option<VisibilityRule>,
}

impl EntityDescriptor {
    /// Returns whether the field may be used as an exact-match filter.
    #[must_use]
    pub fn is_filterable(&self, field_name: &str) -> bool {
        self.filterable_fields.contains(&field_name)
    }
}

static PROGRAM: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["name", "description", "code"],
    filterable_fields: &["status", "category", "visibility"],
    visibility: Some(VisibilityRule::new("sharedWithMFs", "sharedWithLCs")),
};

static SUB_PROGRAM: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["name", "description"],
    filterable_fields: &["status", "programId", "visibility"],
    visibility: Some(VisibilityRule::new("sharedWithMFs", "sharedWithLCs")),
};

static LEARNING_GROUP: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["name", "description"],
    filterable_fields: &["status", "programId", "subProgramId", "learningCenterId"],
    visibility: None,
};

static TEACHER: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["firstName", "lastName", "email"],
    filterable_fields: &["status", "learningCenterId"],
    visibility: None,
};

static STUDENT: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["firstName", "lastName", "email", "parentName"],
    filterable_fields: &["status", "learningGroupId", "learningCenterId"],
    visibility: None,
};

static PRODUCT: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["name", "description", "sku"],
    filterable_fields: &["status", "category"],
    visibility: None,
};

static ORDER: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["orderNumber", "customerName", "notes"],
    filterable_fields: &["status", "paymentStatus"],
    visibility: None,
};

static TRAINING: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["title", "description", "trainerName"],
    filterable_fields: &["status", "category"],
    visibility: None,
};

static APPLICATION: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["applicantName", "email", "organizationName"],
    filterable_fields: &["status", "type"],
    visibility: None,
};

static ACCOUNT: EntityDescriptor = EntityDescriptor {
    searchable_fields: &["name", "email", "organizationName"],
    filterable_fields: &["status", "role"],
    visibility: None,
};

impl EntityKind {
    /// Returns the stable collection path segment.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "programs",
            Self::SubProgram => "sub-programs",
            Self::LearningGroup => "learning-groups",
            Self::Teacher => "teachers",
            Self::Student => "students",
            Self::Product => "products",
            Self::Order => "orders",
            Self::Training => "trainings",
            Self::Application => "applications",
            Self::Account => "accounts",
        }
    }

    /// Returns the plural noun used in user-facing messages.
    #[must_use]
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::LearningGroup => "learning groups",
            other => other.as_str(),
        }
    }

    /// Returns the singular noun used in user-facing messages.
    #[must_use]
    pub fn singular_label(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::SubProgram => "sub-program",
            Self::LearningGroup => "learning group",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Product => "product",
            Self::Order => "order",
            Self::Training => "training",
            Self::Application => "application",
            Self::Account => "account",
        }
    }

    /// Returns all known collections.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[EntityKind] = &[
            EntityKind::Program,
            EntityKind::SubProgram,
            EntityKind::LearningGroup,
            EntityKind::Teacher,
            EntityKind::Student,
            EntityKind::Product,
            EntityKind::Order,
            EntityKind::Training,
            EntityKind::Application,
            EntityKind::Account,
        ];

        ALL
    }

    /// Returns the query and visibility declarations for the collection.
    #[must_use]
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        match self {
            Self::Program => &PROGRAM,
            Self::SubProgram => &SUB_PROGRAM,
            Self::LearningGroup => &LEARNING_GROUP,
            Self::Teacher => &TEACHER,
            Self::Student => &STUDENT,
            Self::Product => &PRODUCT,
            Self::Order => &ORDER,
            Self::Training => &TRAINING,
            Self::Application => &APPLICATION,
            Self::Account => &ACCOUNT,
        }
    }

    /// Returns the visibility rule when the collection is visibility-bearing.
    #[must_use]
    pub fn visibility_rule(&self) -> Option<&'static VisibilityRule> {
        self.descriptor().visibility.as_ref()
    }

    /// Parses a collection path segment.
    ///
    /// Unknown collections are reported as not found.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AppError::NotFound(format!("unknown entity collection '{value}'")))
    }
}

impl Display for EntityKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use campusline_core::AppError;

    use super::EntityKind;

    #[test]
    fn entity_kind_roundtrip_transport_value() {
        for kind in EntityKind::all() {
            let restored = EntityKind::from_str(kind.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(EntityKind::Account), *kind);
        }
    }

    #[test]
    fn unknown_collection_is_not_found() {
        let parsed = EntityKind::from_str("franchises");
        assert!(matches!(parsed, Err(AppError::NotFound(_))));
    }

    #[test]
    fn only_programs_and_sub_programs_carry_visibility() {
        let visibility_bearing: Vec<EntityKind> = EntityKind::all()
            .iter()
            .copied()
            .filter(|kind| kind.visibility_rule().is_some())
            .collect();

        assert_eq!(
            visibility_bearing,
            vec![EntityKind::Program, EntityKind::SubProgram]
        );
    }

    #[test]
    fn every_collection_filters_by_status() {
        for kind in EntityKind::all() {
            assert!(kind.descriptor().is_filterable("status"), "{kind}");
            assert!(!kind.descriptor().searchable_fields.is_empty(), "{kind}");
        }
    }
}
