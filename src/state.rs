use crate::{config::AppConfig, services::store::TripStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub trips: TripStore,
}

impl AppState {
    pub fn new(config: AppConfig, trips: TripStore) -> Self {
        Self { config, trips }
    }
}
