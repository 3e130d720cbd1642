use std::sync::Arc;

use tracing::{debug, error};

use crate::{error::StorageError, models::trip::Trip};

use super::kv::KeyValueStore;

pub const TRIPS_STORAGE_KEY: &str = "@tripr_trips";

/// Keeps the whole trip collection as one JSON array under a single key.
///
/// The public operations never fail: read errors come back as an empty
/// collection and write errors are logged and dropped. Mutations rewrite the
/// full array, so two overlapping callers can lose each other's update.
#[derive(Clone)]
pub struct TripStorage {
    backend: Arc<dyn KeyValueStore>,
    key: Arc<str>,
}

impl TripStorage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, TRIPS_STORAGE_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn try_load_trips(&self) -> Result<Vec<Trip>, StorageError> {
        let Some(raw) = self.backend.get_item(&self.key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let trips: Vec<Trip> = serde_json::from_str(&raw)?;
        Ok(trips)
    }

    pub async fn try_save_trips(&self, trips: &[Trip]) -> Result<(), StorageError> {
        let data = serde_json::to_string(trips)?;
        self.backend.set_item(&self.key, &data).await?;
        Ok(())
    }

    pub async fn load_trips(&self) -> Vec<Trip> {
        match self.try_load_trips().await {
            Ok(trips) => trips,
            Err(err) => {
                error!(key = %self.key, "error loading trips: {err}");
                Vec::new()
            }
        }
    }

    pub async fn save_trips(&self, trips: &[Trip]) {
        if let Err(err) = self.try_save_trips(trips).await {
            error!(key = %self.key, count = trips.len(), "error saving trips: {err}");
        }
    }

    pub async fn add_trip(&self, trip: Trip) {
        let mut items = self.load_trips().await;
        items.push(trip);
        self.save_trips(&items).await;
    }

    pub async fn delete_trip(&self, id: &str) {
        let mut items = self.load_trips().await;
        let before = items.len();
        items.retain(|trip| trip.id != id);
        debug!(trip_id = id, removed = before - items.len(), "deleting trip");
        self.save_trips(&items).await;
    }
}
