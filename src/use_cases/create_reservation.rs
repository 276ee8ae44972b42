//! Create reservation use case.
//! Looks up the user and space, prices the booking, checks availability and
//! persists the new aggregate.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Money, Reservation, ReservationStatus};
use crate::error::CoreError;
use crate::ports::{ReservationRepository, SpaceRepository, UserRepository};
use crate::services::AvailabilityChecker;

#[derive(Debug)]
pub struct CreateReservationInput {
    pub user_id: Uuid,
    pub space_id: Uuid,
    pub event_date: NaiveDate,
    /// Price the caller expects to pay. Defaults to the space's daily price;
    /// a mismatch fails with `WrongTotal`.
    pub total_price: Option<Money>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct CreateReservationOutput {
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
    pub total_price: Money,
}

pub struct CreateReservation {
    users: Arc<dyn UserRepository>,
    spaces: Arc<dyn SpaceRepository>,
    reservations: Arc<dyn ReservationRepository>,
    availability: AvailabilityChecker,
}

impl CreateReservation {
    pub fn new(
        users: Arc<dyn UserRepository>,
        spaces: Arc<dyn SpaceRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        let availability = AvailabilityChecker::new(reservations.clone());
        Self {
            users,
            spaces,
            reservations,
            availability,
        }
    }

    pub async fn execute(
        &self,
        input: CreateReservationInput,
    ) -> Result<CreateReservationOutput, CoreError> {
        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("user", input.user_id))?;
        let space = self
            .spaces
            .find_by_id(input.space_id)
            .await?
            .ok_or_else(|| CoreError::not_found("space", input.space_id))?;

        let total_price = input
            .total_price
            .unwrap_or_else(|| space.daily_price.clone());
        let reservation = Reservation::new(
            user.id,
            space.id,
            input.event_date,
            total_price,
            input.notes,
        );
        reservation.validate(Some(&space))?;

        let available = self
            .availability
            .is_available(space.id, input.event_date, None)
            .await?;
        reservation.check_availability(available)?;

        let saved = self.reservations.save(&reservation).await?;
        tracing::info!(
            reservation_id = %saved.id,
            space_id = %saved.space_id,
            event_date = %saved.event_date,
            "reservation created"
        );

        Ok(CreateReservationOutput {
            reservation_id: saved.id,
            status: saved.status,
            total_price: saved.total_price,
        })
    }
}
