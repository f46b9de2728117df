//! Feed service: loading, refreshing and the live random walk.
//!
//! DESIGN
//! ======
//! `load` swaps in a fresh data set for a source. The SIN source can fail
//! (network, portal, empty window); any failure is logged and the static SIN
//! fallback is installed instead, so the dashboard always has data.
//!
//! While the DAO source is shown and nothing is loading or paused, a
//! background task ticks every refresh interval: KPIs drift by up to ±0.1 %
//! and the generation series rolls forward by one sample.

use std::time::Duration;

use rand::Rng;
use time::OffsetDateTime;
use time::macros::format_description;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::model::{ChangeType, DashboardData, DataSource, GenerationSample};
use crate::services::dataset::{generate_dao_data, generate_sin_fallback};
use crate::state::AppState;

// =============================================================================
// LOAD / REFRESH
// =============================================================================

/// Replace the feed with a fresh data set for `source`.
pub async fn load(state: &AppState, source: DataSource) {
    {
        let mut feed = state.feed.write().await;
        feed.loading = true;
        feed.source = source;
    }

    let data = match source {
        DataSource::Dao => {
            let mut rng = state.rng.lock().await;
            generate_dao_data(&mut *rng, state.config.installation_count)
        }
        DataSource::Sin => match state.sin.fetch_sin_data().await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, retryable = e.retryable(), "SIN load failed; installing fallback data");
                let mut rng = state.rng.lock().await;
                generate_sin_fallback(&mut *rng)
            }
        },
    };

    let mut feed = state.feed.write().await;
    // A newer load for another source wins.
    if feed.source == source {
        feed.data = data;
        feed.loading = false;
        info!(%source, installations = feed.data.installations.len(), "feed loaded");
    }
}

/// Reload whatever source is currently selected.
pub async fn refresh(state: &AppState) {
    let source = state.feed.read().await.source;
    load(state, source).await;
}

pub async fn set_paused(state: &AppState, paused: bool) {
    state.feed.write().await.paused = paused;
    info!(paused, "feed pause toggled");
}

// =============================================================================
// TICK
// =============================================================================

/// One random-walk step over `data`.
///
/// Each KPI moves by `change = (U − 0.5) · 0.2` percent and records it. The
/// oldest generation sample is dropped and a new one labelled `label` is
/// appended, each value ±25 from the previous last sample. An empty series
/// is left alone.
pub fn tick<R: Rng + ?Sized>(data: &mut DashboardData, rng: &mut R, label: &str) {
    for kpi in &mut data.kpis {
        let change = (rng.random::<f64>() - 0.5) * 0.2;
        kpi.value *= 1.0 + change / 100.0;
        kpi.change = Some(change);
        kpi.change_type = if change > 0.0 { ChangeType::Increase } else { ChangeType::Decrease };
    }

    let series = &mut data.chart_data.generation;
    if let Some(last) = series.last().cloned() {
        series.remove(0);
        series.push(GenerationSample {
            time: label.to_string(),
            generation: last.generation + (rng.random::<f64>() - 0.5) * 50.0,
            demand: last.demand + (rng.random::<f64>() - 0.5) * 50.0,
        });
    }
}

/// Tick the shared feed unless it is paused, loading or showing SIN data.
/// Returns whether a tick happened.
pub async fn tick_once(state: &AppState, label: &str) -> bool {
    let mut feed = state.feed.write().await;
    if feed.paused || feed.loading || feed.source == DataSource::Sin {
        return false;
    }
    let mut rng = state.rng.lock().await;
    tick(&mut feed.data, &mut *rng, label);
    debug!(label, "feed ticked");
    true
}

/// `HH:MM` wall-clock label, local time when the offset is known.
#[must_use]
pub fn clock_label() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let fmt = format_description!("[hour]:[minute]");
    now.format(&fmt).unwrap_or_default()
}

/// Spawn the background ticker. The first tick fires one interval after start.
pub fn spawn_refresh_task(state: AppState) -> JoinHandle<()> {
    let interval_ms = state.config.refresh_interval_ms;
    info!(interval_ms, "feed refresh task configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            tick_once(&state, &clock_label()).await;
        }
    })
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
