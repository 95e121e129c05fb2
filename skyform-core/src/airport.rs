use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CoreError, CoreResult};

/// An airport in the directory, keyed by its 3-letter code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub currency: String,
    pub country_code: String,
    pub restricted_on_departure: bool,
    pub restricted_on_destination: bool,
    #[serde(default)]
    pub connections: Vec<AirportConnection>,
}

/// A direct, one-way edge to another airport. Carries a copy of the target's
/// display attributes so the UI can render it without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AirportConnection {
    pub code: String,
    pub name: String,
    pub currency: String,
    pub country_code: String,
    pub restricted_on_departure: bool,
    pub restricted_on_destination: bool,
}

impl Airport {
    /// Whether `code` is listed as a direct destination of this airport.
    pub fn connects_to(&self, code: &str) -> bool {
        self.connections.iter().any(|c| c.code == code)
    }
}

/// Airport record as delivered by the remote source. Restriction flags are
/// loosely typed upstream and coerced on conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAirport {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub restricted_on_departure: Value,
    #[serde(default)]
    pub restricted_on_destination: Value,
    #[serde(default)]
    pub connections: Option<Vec<RawAirportConnection>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAirportConnection {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub restricted_on_departure: Value,
    #[serde(default)]
    pub restricted_on_destination: Value,
}

/// Loose truthiness: null, false, zero and the empty string are false,
/// everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<RawAirportConnection> for AirportConnection {
    fn from(raw: RawAirportConnection) -> Self {
        Self {
            code: raw.code,
            name: raw.name,
            currency: raw.currency,
            country_code: raw.country_code,
            restricted_on_departure: is_truthy(&raw.restricted_on_departure),
            restricted_on_destination: is_truthy(&raw.restricted_on_destination),
        }
    }
}

impl From<RawAirport> for Airport {
    fn from(raw: RawAirport) -> Self {
        Self {
            code: raw.code,
            name: raw.name,
            currency: raw.currency,
            country_code: raw.country_code,
            restricted_on_departure: is_truthy(&raw.restricted_on_departure),
            restricted_on_destination: is_truthy(&raw.restricted_on_destination),
            connections: raw
                .connections
                .unwrap_or_default()
                .into_iter()
                .map(AirportConnection::from)
                .collect(),
        }
    }
}

/// Extract raw airport records from a source response body.
///
/// Accepts `{"airports": [...]}`, a bare array, or `null` (no airports).
pub fn parse_airport_payload(body: Value) -> CoreResult<Vec<RawAirport>> {
    let records = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut map) => match map.remove("airports") {
            Some(Value::Null) | None => {
                return Err(CoreError::InvalidPayload(
                    "expected an airport list, got an object without `airports`".to_string(),
                ))
            }
            Some(list) => list,
        },
        other => other,
    };

    serde_json::from_value(records).map_err(|e| CoreError::InvalidPayload(e.to_string()))
}

/// Convert a raw payload into directory airports.
pub fn normalize_airports(records: Vec<RawAirport>) -> Vec<Airport> {
    records.into_iter().map(Airport::from).collect()
}
