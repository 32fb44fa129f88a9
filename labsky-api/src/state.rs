use std::sync::Arc;

use labsky_core::{CheckinService, Clock, PassengerRepository, PassengerService, SystemClock};

use crate::metrics::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    pub passengers: Arc<PassengerService>,
    pub checkin: Arc<CheckinService>,
    pub metrics: ApiMetrics,
}

impl AppState {
    pub fn new(repo: Arc<dyn PassengerRepository>, metrics: ApiMetrics) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock), metrics)
    }

    pub fn with_clock(repo: Arc<dyn PassengerRepository>, clock: Arc<dyn Clock>, metrics: ApiMetrics) -> Self {
        Self {
            passengers: Arc::new(PassengerService::new(repo.clone())),
            checkin: Arc::new(CheckinService::new(repo, clock)),
            metrics,
        }
    }
}
