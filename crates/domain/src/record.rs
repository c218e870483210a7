use std::borrow::Cow;

use campusline_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde_json::{Map, Value};

use crate::EntityKind;

/// Fields owned by the store; client payloads never set them.
pub const SYSTEM_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Stored entity record: identity, timestamps and a JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    record_id: NonEmptyString,
    kind: EntityKind,
    data: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EntityRecord {
    /// Creates a freshly stored record with `createdAt = updatedAt = now`.
    pub fn new(
        record_id: impl Into<String>,
        kind: EntityKind,
        data: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let now = now.trunc_subsecs(6);

        Ok(Self {
            record_id: NonEmptyString::new(record_id)?,
            kind,
            data: without_system_fields(data),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the stable record identifier.
    #[must_use]
    pub fn record_id(&self) -> &NonEmptyString {
        &self.record_id
    }

    /// Returns the owning collection.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the record body without system fields.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Resolves a field by name, including the system fields.
    #[must_use]
    pub fn field(&self, field_name: &str) -> Option<Cow<'_, Value>> {
        match field_name {
            "id" => Some(Cow::Owned(Value::String(
                self.record_id.as_str().to_owned(),
            ))),
            "createdAt" => Some(Cow::Owned(Value::String(format_timestamp(
                self.created_at,
            )))),
            "updatedAt" => Some(Cow::Owned(Value::String(format_timestamp(
                self.updated_at,
            )))),
            _ => self.data.get(field_name).map(Cow::Borrowed),
        }
    }

    /// Returns a body field when it holds a string.
    #[must_use]
    pub fn text_field(&self, field_name: &str) -> Option<&str> {
        self.data.get(field_name).and_then(Value::as_str)
    }

    /// Merges the provided top-level fields and bumps `updatedAt`.
    ///
    /// `updatedAt` always moves forward, by one microsecond when the clock has
    /// not advanced since the previous write.
    pub fn apply_patch(&mut self, patch: Map<String, Value>, now: DateTime<Utc>) {
        for (field_name, value) in without_system_fields(patch) {
            self.data.insert(field_name, value);
        }

        let now = now.trunc_subsecs(6);
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }

    /// Returns the flattened JSON representation used on the wire.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.data.len() + SYSTEM_FIELDS.len());
        object.insert(
            "id".to_owned(),
            Value::String(self.record_id.as_str().to_owned()),
        );
        for (field_name, value) in &self.data {
            object.insert(field_name.clone(), value.clone());
        }
        object.insert(
            "createdAt".to_owned(),
            Value::String(format_timestamp(self.created_at)),
        );
        object.insert(
            "updatedAt".to_owned(),
            Value::String(format_timestamp(self.updated_at)),
        );

        Value::Object(object)
    }
}

/// Formats a timestamp as RFC 3339 with microsecond precision.
#[must_use]
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Validates that a client payload is a JSON object and drops system fields.
pub fn payload_object(payload: Value) -> AppResult<Map<String, Value>> {
    match payload {
        Value::Object(object) => Ok(without_system_fields(object)),
        _ => Err(AppError::InvalidInput(
            "request body must be a JSON object".to_owned(),
        )),
    }
}

fn without_system_fields(mut object: Map<String, Value>) -> Map<String, Value> {
    for field_name in SYSTEM_FIELDS {
        object.remove(*field_name);
    }
    object
}
