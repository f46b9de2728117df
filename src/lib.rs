//! MEX Energy DAO data engine.
//!
//! Synthetic installation generation, S-curve projections, choropleth and
//! treemap aggregation, the ONS grid feed, and the live refresh loop.

pub mod color;
pub mod config;
pub mod format;
pub mod geo;
pub mod model;
pub mod ons;
pub mod services;
pub mod state;
pub mod treemap;
