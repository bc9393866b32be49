//! Almacén de viajes
//!
//! `RideStore` es la costura entre el controlador y el motor de
//! almacenamiento. La implementación en memoria es la de por defecto;
//! `PgRideStore` cubre el caso con PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::models::ride::{NewRide, Ride, RideAvailability};
use crate::services::ride_rules;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait RideStore: Send + Sync {
    /// Insertar o sobrescribir, indexado por `ride.ride_id`
    async fn put(&self, ride: Ride) -> AppResult<()>;

    async fn get(&self, ride_id: i64) -> AppResult<Option<Ride>>;

    /// Copia del contenido actual en orden de inserción
    async fn all(&self) -> AppResult<Vec<Ride>>;

    /// Asignar el siguiente id e insertar en un solo paso atómico
    async fn insert_new(&self, new_ride: NewRide, date_offered: NaiveDateTime) -> AppResult<Ride>;

    /// Cambiar la disponibilidad sólo si sigue siendo `expected`
    async fn compare_and_set_availability(
        &self,
        ride_id: i64,
        expected: RideAvailability,
        next: RideAvailability,
    ) -> AppResult<bool>;
}

#[derive(Default)]
struct RideTable {
    order: Vec<i64>,
    rides: HashMap<i64, Ride>,
}

impl RideTable {
    fn upsert(&mut self, ride: Ride) {
        if !self.rides.contains_key(&ride.ride_id) {
            self.order.push(ride.ride_id);
        }
        self.rides.insert(ride.ride_id, ride);
    }
}

#[derive(Default)]
pub struct InMemoryRideStore {
    table: RwLock<RideTable>,
}

impl InMemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RideStore for InMemoryRideStore {
    async fn put(&self, ride: Ride) -> AppResult<()> {
        self.table.write().await.upsert(ride);
        Ok(())
    }

    async fn get(&self, ride_id: i64) -> AppResult<Option<Ride>> {
        Ok(self.table.read().await.rides.get(&ride_id).cloned())
    }

    async fn all(&self) -> AppResult<Vec<Ride>> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rides.get(id))
            .cloned()
            .collect())
    }

    async fn insert_new(&self, new_ride: NewRide, date_offered: NaiveDateTime) -> AppResult<Ride> {
        // El cálculo del id y la inserción comparten el mismo write lock
        let mut table = self.table.write().await;
        let ride_id = ride_rules::next_id(table.rides.keys().copied());
        let ride = Ride::offer(ride_id, new_ride, date_offered);
        table.upsert(ride.clone());

        log::debug!("💾 Viaje {} almacenado en memoria ({} en total)", ride_id, table.rides.len());
        Ok(ride)
    }

    async fn compare_and_set_availability(
        &self,
        ride_id: i64,
        expected: RideAvailability,
        next: RideAvailability,
    ) -> AppResult<bool> {
        let mut table = self.table.write().await;
        match table.rides.get_mut(&ride_id) {
            Some(ride) if ride.availability == expected => {
                ride.availability = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::parse_departure;
    use std::sync::Arc;

    fn new_ride(origin: &str) -> NewRide {
        NewRide {
            driver: "driver".to_string(),
            departure: parse_departure("Jun 25 2030 1:30PM").unwrap(),
            origin: origin.to_string(),
            destination: "Garissa".to_string(),
            vehicle_number_plate: "KBC-A21".to_string(),
            capacity: 3,
            cost: 350.0,
        }
    }

    fn offered_at() -> NaiveDateTime {
        parse_departure("Jun 20 2030 8:00AM").unwrap()
    }

    #[tokio::test]
    async fn test_insert_new_assigns_sequential_ids() {
        let store = InMemoryRideStore::new();
        for expected in 1..=5 {
            let ride = store.insert_new(new_ride("Nairobi"), offered_at()).await.unwrap();
            assert_eq!(ride.ride_id, expected);
        }
        let ids: Vec<i64> = store.all().await.unwrap().iter().map(|r| r.ride_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_insert_new_continues_after_max() {
        let store = InMemoryRideStore::new();
        store.put(Ride::offer(10, new_ride("Mombasa"), offered_at())).await.unwrap();

        let ride = store.insert_new(new_ride("Nairobi"), offered_at()).await.unwrap();
        assert_eq!(ride.ride_id, 11);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryRideStore::new();
        assert!(store.get(6454).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_without_reordering() {
        let store = InMemoryRideStore::new();
        let first = store.insert_new(new_ride("Nairobi"), offered_at()).await.unwrap();
        store.insert_new(new_ride("Kisumu"), offered_at()).await.unwrap();

        let mut changed = first.clone();
        changed.destination = "Lamu".to_string();
        store.put(changed).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].ride_id, 1);
        assert_eq!(all[0].destination, "Lamu");
    }

    #[tokio::test]
    async fn test_compare_and_set_availability() {
        let store = InMemoryRideStore::new();
        let ride = store.insert_new(new_ride("Nairobi"), offered_at()).await.unwrap();

        let changed = store
            .compare_and_set_availability(ride.ride_id, RideAvailability::Available, RideAvailability::Taken)
            .await
            .unwrap();
        assert!(changed);

        let again = store
            .compare_and_set_availability(ride.ride_id, RideAvailability::Available, RideAvailability::Cancelled)
            .await
            .unwrap();
        assert!(!again);

        let stored = store.get(ride.ride_id).await.unwrap().unwrap();
        assert_eq!(stored.availability, RideAvailability::Taken);
        assert!(!store
            .compare_and_set_availability(99, RideAvailability::Available, RideAvailability::Taken)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_never_share_ids() {
        let store = Arc::new(InMemoryRideStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_new(new_ride("Nairobi"), offered_at()).await.unwrap().ride_id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<i64>>());
    }
}
