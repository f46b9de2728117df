//! CKAN `datastore_search_sql` client for the ONS open-data portal.
//!
//! Thin HTTP wrapper: one GET per SQL query, the three SIN queries issued
//! concurrently. SQL building and response parsing are pure for testability.

use std::time::Duration;

use serde::de::DeserializeOwned;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use super::config::{GENERATION_RESOURCE, LOAD_RESOURCE, OnsConfig, PRICE_RESOURCE};
use super::reshape::build_sin_data;
use super::types::{Envelope, GenerationRecord, LoadRecord, OnsError, PriceRecord};
use crate::model::DashboardData;

// =============================================================================
// CLIENT
// =============================================================================

pub struct OnsClient {
    http: reqwest::Client,
    config: OnsConfig,
}

impl OnsClient {
    /// # Errors
    ///
    /// Returns [`OnsError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: OnsConfig) -> Result<Self, OnsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| OnsError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &OnsConfig {
        &self.config
    }

    async fn query<T: DeserializeOwned>(&self, resource: &'static str, sql: String) -> Result<Vec<T>, OnsError> {
        tracing::debug!(resource, %sql, "ons query");
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[("sql", sql)])
            .send()
            .await
            .map_err(|e| OnsError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| OnsError::ApiRequest(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(OnsError::ApiResponse { status, body: text });
        }

        parse_records(resource, &text)
    }

    /// Fetch the last `lookback_hours` of generation, load and price and
    /// reshape them into the SIN data set.
    ///
    /// # Errors
    ///
    /// Any transport, status or parse failure on any of the three queries,
    /// an out-of-range lookback, or [`OnsError::NoValidData`] when no hour
    /// is usable.
    pub async fn fetch_sin_data(&self) -> Result<DashboardData, OnsError> {
        let since = since_timestamp(OffsetDateTime::now_utc(), self.config.lookback_hours)?;
        let (generation, load, price) = tokio::try_join!(
            self.query::<GenerationRecord>(GENERATION_RESOURCE, build_sql(GENERATION_RESOURCE, &since, None)),
            self.query::<LoadRecord>(LOAD_RESOURCE, build_sql(LOAD_RESOURCE, &since, None)),
            self.query::<PriceRecord>(PRICE_RESOURCE, build_sql(PRICE_RESOURCE, &since, Some(&self.config.submarket))),
        )?;

        tracing::info!(
            generation = generation.len(),
            load = load.len(),
            price = price.len(),
            "ons records fetched"
        );
        build_sin_data(&generation, &load, &price, &self.config.submarket)
    }
}

// =============================================================================
// QUERY BUILDING
// =============================================================================

/// `YYYY-MM-DDTHH:MM:SS` in UTC, `hours` before `now`.
///
/// # Errors
///
/// [`OnsError::LookbackOutOfRange`] when the window starts before the
/// earliest representable date.
pub fn since_timestamp(now: OffsetDateTime, hours: u64) -> Result<String, OnsError> {
    let then = i64::try_from(hours)
        .ok()
        .and_then(|h| h.checked_mul(3600))
        .and_then(|secs| now.checked_sub(time::Duration::seconds(secs)))
        .ok_or(OnsError::LookbackOutOfRange { hours })?;
    let then = PrimitiveDateTime::new(then.date(), then.time());
    let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    Ok(then.format(&fmt).unwrap_or_default())
}

/// `SELECT` over one resource since `since`, optionally filtered to a submarket.
#[must_use]
pub fn build_sql(resource: &str, since: &str, submarket: Option<&str>) -> String {
    let filter = submarket.map(|s| format!(" AND id_submercado = '{s}'")).unwrap_or_default();
    format!("SELECT * from \"{resource}\" WHERE din_instante >= '{since}'{filter} ORDER BY din_instante ASC")
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_records<T: DeserializeOwned>(resource: &'static str, json: &str) -> Result<Vec<T>, OnsError> {
    let envelope: Envelope<T> = serde_json::from_str(json).map_err(|e| OnsError::ApiParse(e.to_string()))?;
    if !envelope.success {
        return Err(OnsError::QueryRejected { resource });
    }
    Ok(envelope.result.map(|r| r.records).unwrap_or_default())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
