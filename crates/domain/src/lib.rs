//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod entity;
mod mutation;
mod pricing;
mod record;
mod visibility;

pub use audit::AuditAction;
pub use entity::{EntityDescriptor, EntityKind};
pub use mutation::{MutationDecision, MutationOperation, authorize_mutation};
pub use pricing::{PRICING_SNAPSHOT_FIELD, PRICING_SNAPSHOT_VERSION, PricingSnapshot};
pub use record::{EntityRecord, SYSTEM_FIELDS, format_timestamp, payload_object};
pub use visibility::{Visibility, VisibilityRule};
