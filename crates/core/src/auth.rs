use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, NonEmptyString};

/// Organizational tier of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Headquarters.
    #[serde(rename = "HQ")]
    Headquarters,
    /// Master franchise.
    #[serde(rename = "MF")]
    MasterFranchise,
    /// Learning center.
    #[serde(rename = "LC")]
    LearningCenter,
    /// Teacher trainer.
    #[serde(rename = "TT")]
    TeacherTrainer,
}

impl Role {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headquarters => "HQ",
            Self::MasterFranchise => "MF",
            Self::LearningCenter => "LC",
            Self::TeacherTrainer => "TT",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Headquarters,
            Role::MasterFranchise,
            Role::LearningCenter,
            Role::TeacherTrainer,
        ];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "HQ" => Ok(Self::Headquarters),
            "MF" => Ok(Self::MasterFranchise),
            "LC" => Ok(Self::LearningCenter),
            "TT" => Ok(Self::TeacherTrainer),
            _ => Err(AppError::InvalidInput(format!(
                "unknown role '{value}', expected one of HQ, MF, LC, TT"
            ))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifier of one organizational unit, e.g. a specific master franchise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(NonEmptyString);

impl ScopeId {
    /// Creates a validated scope identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ScopeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Role and organizational scope of the caller issuing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    role: Role,
    scope: Option<ScopeId>,
}

impl CallerIdentity {
    /// Creates a caller identity.
    #[must_use]
    pub fn new(role: Role, scope: Option<ScopeId>) -> Self {
        Self { role, scope }
    }

    /// Creates a caller identity without an organizational scope.
    #[must_use]
    pub fn unscoped(role: Role) -> Self {
        Self { role, scope: None }
    }

    /// Returns the caller role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the active scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<&ScopeId> {
        self.scope.as_ref()
    }
}
