//! Shared feed state.
//!
//! DESIGN
//! ======
//! `AppState` is cloned into the refresh task and the command handlers.
//! It holds the current dashboard data behind an async `RwLock`, the
//! random source that every generator and tick draws from, and the SIN
//! source used when the grid feed is selected. Locks are never held across
//! a network await.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, RwLock};

use crate::config::FeedConfig;
use crate::model::{DashboardData, DataSource};
use crate::ons::SinSource;
use crate::services::dataset::generate_dao_data;

// =============================================================================
// FEED STATE
// =============================================================================

/// What the dashboard is currently showing.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub data: DashboardData,
    pub source: DataSource,
    /// Set while a load is in flight; ticks are suppressed.
    pub loading: bool,
    /// User pause; ticks are suppressed.
    pub paused: bool,
}

// =============================================================================
// APP STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<RwLock<FeedState>>,
    pub rng: Arc<Mutex<StdRng>>,
    pub sin: Arc<dyn SinSource>,
    pub config: FeedConfig,
}

impl AppState {
    /// Start on the DAO source with freshly generated data, marked loading
    /// until the first [`crate::services::feed::load`] completes.
    #[must_use]
    pub fn new(config: FeedConfig, sin: Arc<dyn SinSource>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let data = generate_dao_data(&mut rng, config.installation_count);
        let feed = FeedState { data, source: DataSource::Dao, loading: true, paused: false };
        Self { feed: Arc::new(RwLock::new(feed)), rng: Arc::new(Mutex::new(rng)), sin, config }
    }

    /// Snapshot of the current data.
    pub async fn data(&self) -> DashboardData {
        self.feed.read().await.data.clone()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
