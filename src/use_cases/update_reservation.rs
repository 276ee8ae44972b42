//! Update reservation use case.
//! Re-checks availability only when the space or date actually changes,
//! excluding the reservation's own id so an unchanged slot re-validates
//! against itself. An explicit CANCELLED status request goes through
//! `transitions::cancel`, never a raw field assignment.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{transitions, Reservation, ReservationStatus};
use crate::error::CoreError;
use crate::ports::{PaymentRepository, ReservationRepository, SpaceRepository};
use crate::services::AvailabilityChecker;

#[derive(Debug, Default)]
pub struct UpdateReservationInput {
    pub reservation_id: Uuid,
    pub space_id: Option<Uuid>,
    pub event_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug)]
pub struct UpdateReservationOutput {
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
}

pub struct UpdateReservation {
    spaces: Arc<dyn SpaceRepository>,
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
    availability: AvailabilityChecker,
}

impl UpdateReservation {
    pub fn new(
        spaces: Arc<dyn SpaceRepository>,
        reservations: Arc<dyn ReservationRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        let availability = AvailabilityChecker::new(reservations.clone());
        Self {
            spaces,
            reservations,
            payments,
            availability,
        }
    }

    pub async fn execute(
        &self,
        input: UpdateReservationInput,
    ) -> Result<UpdateReservationOutput, CoreError> {
        let mut reservation: Reservation =
            self.reservations.find_by_id(input.reservation_id).await?;

        let space_changed = input
            .space_id
            .is_some_and(|space_id| space_id != reservation.space_id);
        let date_changed = input
            .event_date
            .is_some_and(|date| date != reservation.event_date);

        if space_changed {
            // Moving to another space re-prices the reservation at that
            // space's daily rate.
            let space_id = input.space_id.unwrap_or(reservation.space_id);
            let space = self
                .spaces
                .find_by_id(space_id)
                .await?
                .ok_or_else(|| CoreError::not_found("space", space_id))?;
            // The new price must still cover what has already been paid, or
            // the aggregate ends up owing the customer and balance() breaks.
            let total_paid = reservation.total_paid();
            if space.daily_price.less_than(&total_paid) {
                return Err(CoreError::RepriceBelowPaid {
                    new_total: space.daily_price.format(),
                    total_paid: total_paid.format(),
                });
            }
            reservation.space_id = space.id;
            reservation.total_price = space.daily_price.clone();
            reservation.validate(Some(&space))?;
        }
        if let Some(event_date) = input.event_date {
            reservation.event_date = event_date;
        }

        if space_changed || date_changed {
            let available = self
                .availability
                .is_available(
                    reservation.space_id,
                    reservation.event_date,
                    Some(reservation.id),
                )
                .await?;
            reservation.check_availability(available)?;
        }

        if let Some(notes) = input.notes {
            reservation.notes = Some(notes);
        }

        match input.status {
            Some(ReservationStatus::Cancelled) => {
                transitions::cancel(&mut reservation);
                self.payments
                    .delete_by_reservation_id(reservation.id)
                    .await?;
                tracing::info!(reservation_id = %reservation.id, "reservation cancelled via update");
            }
            Some(status) => reservation.status = status,
            None => {}
        }

        let saved = self.reservations.save(&reservation).await?;
        tracing::info!(
            reservation_id = %saved.id,
            status = %saved.status,
            "reservation updated"
        );

        Ok(UpdateReservationOutput {
            reservation_id: saved.id,
            status: saved.status,
        })
    }
}
