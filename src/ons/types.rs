//! ONS wire types and errors.
//!
//! The open-data portal is a CKAN instance; `datastore_search_sql` answers
//! `{ "success": true, "result": { "records": [...] } }`. Numeric columns
//! arrive as JSON numbers, numeric strings or `null` depending on the
//! resource, so every measurement deserializes leniently to `f64`.

use serde::{Deserialize, Deserializer};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while fetching or reshaping ONS data.
#[derive(Debug, thiserror::Error)]
pub enum OnsError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed in transport.
    #[error("ONS request failed: {0}")]
    ApiRequest(String),

    /// The portal returned a non-success HTTP status.
    #[error("ONS response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("ONS response parse failed: {0}")]
    ApiParse(String),

    /// CKAN answered but flagged the query as failed.
    #[error("ONS query rejected for resource {resource}")]
    QueryRejected { resource: &'static str },

    /// The lookback window reaches before the earliest representable date.
    #[error("lookback of {hours} hours is out of range")]
    LookbackOutOfRange { hours: u64 },

    /// No hour had both demand and generation.
    #[error("no valid data from ONS")]
    NoValidData,
}

impl OnsError {
    /// Transient failures worth retrying on the next refresh.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub result: Option<QueryResult<T>>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResult<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

// =============================================================================
// RECORDS
// =============================================================================

/// One row of hourly generation by source (MWmed).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationRecord {
    pub din_instante: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_geracao_hidraulica: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_geracao_termica: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_geracao_nuclear: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_geracao_solar: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_geracao_eolica: f64,
}

/// One row of hourly load (MWmed).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadRecord {
    pub din_instante: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_cargahoraria: f64,
}

/// One row of settlement price (R$/MWh).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceRecord {
    pub din_instante: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub val_pld: f64,
}

/// Number, numeric string, or anything else as 0.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
