//! Repository ports consumed by the core.
//! Persistence adapters implement these; the core never sees a driver error
//! directly, only `RepositoryError`.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Payment, Reservation, Space, User};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A storage-level uniqueness violation, e.g. a second active reservation
    /// for the same space and date racing past the availability check.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Store of reservation aggregates (payments included).
///
/// Consistency guarantee required of implementations: `save` must reject a
/// reservation whose `(space_id, event_date)` pair is already held by a
/// *different* reservation in an active status, returning
/// `RepositoryError::Conflict`. The availability check in the use cases is a
/// check-then-act read across reservations; this constraint is what makes it
/// safe under concurrent creations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Reservation>;
    async fn save(&self, reservation: &Reservation) -> RepositoryResult<Reservation>;
    async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<()>;
    async fn exists_by_id(&self, id: Uuid) -> RepositoryResult<bool>;
    /// Does an active reservation other than `exclude` hold this space/date?
    async fn exists_active_for(
        &self,
        space_id: Uuid,
        event_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: &Payment) -> RepositoryResult<Payment>;
    async fn find_by_reservation_id(&self, reservation_id: Uuid)
        -> RepositoryResult<Vec<Payment>>;
    /// Discard every payment row of a reservation. Cancellation is
    /// destructive, and the stored rows must match the aggregate's cleared
    /// list or a later payment would validate against ghost history.
    async fn delete_by_reservation_id(&self, reservation_id: Uuid) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Space>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
}
