use campusline_core::Role;

use crate::EntityKind;

/// Write operations guarded by the mutation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOperation {
    /// Record creation.
    Create,
    /// Partial record update.
    Update,
    /// Record removal.
    Delete,
}

impl MutationOperation {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Outcome of a mutation authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationDecision {
    /// The role may perform the operation.
    Allowed,
    /// The role may not perform the operation.
    Denied {
        /// Human-readable reason, e.g. "Only HQ can create programs."
        reason: String,
    },
}

impl MutationDecision {
    /// Returns whether the decision allows the operation.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

struct MutationRule {
    kind: EntityKind,
    operations: &'static [MutationOperation],
    allowed_roles: &'static [Role],
}

const ALL_OPERATIONS: &[MutationOperation] = &[
    MutationOperation::Create,
    MutationOperation::Update,
    MutationOperation::Delete,
];

// Collections without a rule accept writes from every role.
static MUTATION_RULES: &[MutationRule] = &[
    MutationRule {
        kind: EntityKind::Program,
        operations: ALL_OPERATIONS,
        allowed_roles: &[Role::Headquarters],
    },
    MutationRule {
        kind: EntityKind::SubProgram,
        operations: ALL_OPERATIONS,
        allowed_roles: &[Role::MasterFranchise],
    },
    MutationRule {
        kind: EntityKind::Account,
        operations: ALL_OPERATIONS,
        allowed_roles: &[Role::Headquarters],
    },
];

/// Decides whether a role may perform a write on a collection.
///
/// The decision is role-only; it does not inspect record ownership.
#[must_use]
pub fn authorize_mutation(
    role: Role,
    kind: EntityKind,
    operation: MutationOperation,
) -> MutationDecision {
    let Some(rule) = MUTATION_RULES
        .iter()
        .find(|rule| rule.kind == kind && rule.operations.contains(&operation))
    else {
        return MutationDecision::Allowed;
    };

    if rule.allowed_roles.contains(&role) {
        return MutationDecision::Allowed;
    }

    let allowed = rule
        .allowed_roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" or ");

    MutationDecision::Denied {
        reason: format!(
            "Only {allowed} can {} {}.",
            operation.as_str(),
            kind.plural_label()
        ),
    }
}
