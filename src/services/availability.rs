//! Space availability lookup.
//! One active reservation per space per calendar day; nothing else (capacity,
//! time of day) is considered here.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::ports::{RepositoryResult, ReservationRepository};

pub struct AvailabilityChecker {
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityChecker {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// True when no active reservation other than `exclude` holds the
    /// space/date. `exclude` is `None` on creation and the reservation's own
    /// id on update, so re-validating an unchanged date against itself
    /// always succeeds.
    pub async fn is_available(
        &self,
        space_id: Uuid,
        event_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> RepositoryResult<bool> {
        let occupied = self
            .reservations
            .exists_active_for(space_id, event_date, exclude)
            .await?;
        if occupied {
            tracing::debug!(%space_id, %event_date, "space already booked");
        }
        Ok(!occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryReservationRepository;
    use crate::domain::{Money, Reservation};

    #[tokio::test]
    async fn reports_availability_and_self_exclusion() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let checker = AvailabilityChecker::new(repo.clone());

        let space_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert!(checker.is_available(space_id, date, None).await.unwrap());

        let existing = Reservation::new(
            Uuid::new_v4(),
            space_id,
            date,
            Money::of("300.00").unwrap(),
            None,
        );
        repo.save(&existing).await.unwrap();

        assert!(!checker.is_available(space_id, date, None).await.unwrap());
        assert!(checker
            .is_available(space_id, date, Some(existing.id))
            .await
            .unwrap());
    }
}
