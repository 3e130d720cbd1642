use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::models::trip::{sort_newest_first, Trip};

use super::storage::TripStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Empty, the first load has not finished.
    Uninitialized,
    /// Holds whatever the last load returned.
    Ready,
}

/// In-memory trip collection shared with the web handlers.
///
/// Every mutation goes to storage first and then reloads the full
/// collection, so memory always mirrors what was persisted.
#[derive(Clone)]
pub struct TripStore {
    inner: Arc<Inner>,
}

struct Inner {
    storage: TripStorage,
    trips: watch::Sender<Vec<Trip>>,
    ready: AtomicBool,
    mutation: Mutex<()>,
}

impl TripStore {
    pub fn new(storage: TripStorage) -> Self {
        let (trips, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                storage,
                trips,
                ready: AtomicBool::new(false),
                mutation: Mutex::new(()),
            }),
        }
    }

    pub fn state(&self) -> StoreState {
        if self.inner.ready.load(Ordering::Acquire) {
            StoreState::Ready
        } else {
            StoreState::Uninitialized
        }
    }

    /// Replaces the in-memory collection with what storage holds.
    ///
    /// Waits for any add or delete in flight, so an older snapshot can never
    /// overwrite the reload that follows a write.
    pub async fn load(&self) {
        let _guard = self.inner.mutation.lock().await;
        self.reload().await;
    }

    /// Callers must hold the mutation lock.
    async fn reload(&self) {
        let trips = self.inner.storage.load_trips().await;
        debug!(count = trips.len(), "trips loaded");
        self.inner.trips.send_replace(trips);
        self.inner.ready.store(true, Ordering::Release);
    }

    pub async fn add(&self, trip: Trip) {
        let _guard = self.inner.mutation.lock().await;
        info!(trip_id = %trip.id, name = %trip.name, "adding trip");
        self.inner.storage.add_trip(trip).await;
        self.reload().await;
    }

    pub async fn delete(&self, id: &str) {
        let _guard = self.inner.mutation.lock().await;
        info!(trip_id = id, "deleting trip");
        self.inner.storage.delete_trip(id).await;
        self.reload().await;
    }

    /// Snapshot in storage order.
    pub fn trips(&self) -> Vec<Trip> {
        self.inner.trips.borrow().clone()
    }

    pub fn sorted_trips(&self) -> Vec<Trip> {
        let mut trips = self.trips();
        sort_newest_first(&mut trips);
        trips
    }

    pub fn find(&self, id: &str) -> Option<Trip> {
        self.inner.trips.borrow().iter().find(|t| t.id == id).cloned()
    }

    /// Notified with the new collection after every load.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Trip>> {
        self.inner.trips.subscribe()
    }
}
