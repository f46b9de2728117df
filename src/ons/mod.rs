//! ONS: live national-grid (SIN) data from the operator's open-data portal.
//!
//! DESIGN
//! ======
//! `OnsClient` issues three SQL queries against the CKAN datastore
//! (generation by source, hourly load, settlement price for one submarket)
//! and `reshape::build_sin_data` turns the rows into a `DashboardData`.
//! The feed only sees the `SinSource` trait, so tests can stand in a
//! canned source for the network.

pub mod client;
pub mod config;
pub mod reshape;
pub mod types;

pub use client::OnsClient;
pub use config::OnsConfig;
pub use types::OnsError;

use crate::model::DashboardData;

/// Anything that can produce a SIN data set.
#[async_trait::async_trait]
pub trait SinSource: Send + Sync {
    async fn fetch_sin_data(&self) -> Result<DashboardData, OnsError>;
}

#[async_trait::async_trait]
impl SinSource for OnsClient {
    async fn fetch_sin_data(&self) -> Result<DashboardData, OnsError> {
        OnsClient::fetch_sin_data(self).await
    }
}
