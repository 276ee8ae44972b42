//! In-memory implementations of the repository ports.
//! Reference implementation of the port contract, including the uniqueness
//! guarantee on active reservations; used by the integration tests and by
//! callers that need a throwaway store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Payment, Reservation, Space, User};
use crate::ports::{
    PaymentRepository, RepositoryError, RepositoryResult, ReservationRepository, SpaceRepository,
    UserRepository,
};

fn lock<T>(mutex: &Mutex<T>) -> RepositoryResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Storage("store lock poisoned".to_string()))
}

#[derive(Clone, Default)]
pub struct InMemoryReservationRepository {
    reservations: Arc<Mutex<HashMap<Uuid, Reservation>>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Reservation> {
        let store = lock(&self.reservations)?;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn save(&self, reservation: &Reservation) -> RepositoryResult<Reservation> {
        let mut store = lock(&self.reservations)?;
        // Uniqueness constraint scoped to (space_id, event_date) for active
        // statuses, as the port contract requires.
        if reservation.is_active() {
            let taken = store.values().any(|existing| {
                existing.id != reservation.id
                    && existing.is_active()
                    && existing.space_id == reservation.space_id
                    && existing.event_date == reservation.event_date
            });
            if taken {
                return Err(RepositoryError::Conflict(format!(
                    "space {} already booked on {}",
                    reservation.space_id, reservation.event_date
                )));
            }
        }
        store.insert(reservation.id, reservation.clone());
        Ok(reservation.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<()> {
        let mut store = lock(&self.reservations)?;
        store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn exists_by_id(&self, id: Uuid) -> RepositoryResult<bool> {
        Ok(lock(&self.reservations)?.contains_key(&id))
    }

    async fn exists_active_for(
        &self,
        space_id: Uuid,
        event_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> RepositoryResult<bool> {
        let store = lock(&self.reservations)?;
        Ok(store.values().any(|reservation| {
            Some(reservation.id) != exclude
                && reservation.is_active()
                && reservation.space_id == space_id
                && reservation.event_date == event_date
        }))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<Mutex<Vec<Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> RepositoryResult<Payment> {
        lock(&self.payments)?.push(payment.clone());
        Ok(payment.clone())
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: Uuid,
    ) -> RepositoryResult<Vec<Payment>> {
        let store = lock(&self.payments)?;
        Ok(store
            .iter()
            .filter(|payment| payment.reservation_id == reservation_id)
            .cloned()
            .collect())
    }

    async fn delete_by_reservation_id(&self, reservation_id: Uuid) -> RepositoryResult<()> {
        lock(&self.payments)?.retain(|payment| payment.reservation_id != reservation_id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySpaceRepository {
    spaces: Arc<Mutex<HashMap<Uuid, Space>>>,
}

impl InMemorySpaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, space: Space) -> RepositoryResult<()> {
        lock(&self.spaces)?.insert(space.id, space);
        Ok(())
    }
}

#[async_trait]
impl SpaceRepository for InMemorySpaceRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Space>> {
        Ok(lock(&self.spaces)?.get(&id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> RepositoryResult<()> {
        lock(&self.users)?.insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(lock(&self.users)?.get(&id).cloned())
    }
}
