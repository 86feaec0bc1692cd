use tracing::warn;

use crate::api::client::ApiError;
use crate::api::types::DashboardStats;
use crate::api::worker::ApiRequest;

/// View state for the dashboard screen. Stats are a read-only snapshot,
/// re-fetched on every visit and never mutated locally.
///
/// Load failures are deliberately not surfaced: the practice flow blocks and
/// must inform the user, the dashboard is best-effort and only logs.
pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
    pub loading: bool,
    generation: u64,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            stats: None,
            loading: true,
            generation: 0,
        }
    }

    pub fn request_stats(&mut self) -> ApiRequest {
        self.generation += 1;
        self.loading = true;
        ApiRequest::LoadStats {
            generation: self.generation,
        }
    }

    pub fn on_stats(&mut self, generation: u64, outcome: Result<DashboardStats, ApiError>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        match outcome {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => warn!(error = %err, "failed to load dashboard stats"),
        }
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
