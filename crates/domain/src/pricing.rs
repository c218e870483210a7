use campusline_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Learning-group field holding the pricing snapshot.
pub const PRICING_SNAPSHOT_FIELD: &str = "pricingSnapshot";

/// Current schema version of [`PricingSnapshot`].
pub const PRICING_SNAPSHOT_VERSION: u32 = 1;

/// Pricing captured on a learning group when it was configured.
///
/// Stored as a structured object only. Legacy JSON-encoded string payloads are
/// migrated at the write boundary by [`PricingSnapshot::from_transport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn current_version() -> u32 {
    PRICING_SNAPSHOT_VERSION
}

impl PricingSnapshot {
    /// Parses a snapshot from an object or from a JSON-encoded string.
    pub fn from_transport(value: &Value) -> AppResult<Self> {
        let object = match value {
            Value::Object(_) => value.clone(),
            Value::String(encoded) => serde_json::from_str::<Value>(encoded).map_err(|error| {
                AppError::InvalidInput(format!(
                    "{PRICING_SNAPSHOT_FIELD} string is not valid JSON: {error}"
                ))
            })?,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "{PRICING_SNAPSHOT_FIELD} must be an object"
                )));
            }
        };

        if !object.is_object() {
            return Err(AppError::InvalidInput(format!(
                "{PRICING_SNAPSHOT_FIELD} must be an object"
            )));
        }

        let snapshot: Self = serde_json::from_value(object).map_err(|error| {
            AppError::InvalidInput(format!("invalid {PRICING_SNAPSHOT_FIELD}: {error}"))
        })?;

        if snapshot.version == 0 || snapshot.version > PRICING_SNAPSHOT_VERSION {
            return Err(AppError::InvalidInput(format!(
                "unsupported {PRICING_SNAPSHOT_FIELD} version {}",
                snapshot.version
            )));
        }

        if snapshot.price.is_some_and(|price| price < 0.0) {
            return Err(AppError::InvalidInput(format!(
                "{PRICING_SNAPSHOT_FIELD} price must not be negative"
            )));
        }

        Ok(snapshot)
    }

    /// Returns the schema version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the currency code, if captured.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Returns the captured price, if any.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Returns the canonical stored representation.
    pub fn to_value(&self) -> AppResult<Value> {
        serde_json::to_value(self).map_err(|error| {
            AppError::Internal(format!("failed to encode {PRICING_SNAPSHOT_FIELD}: {error}"))
        })
    }
}
