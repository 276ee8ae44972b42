//! Cancel reservation use case.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{transitions, ReservationStatus};
use crate::error::CoreError;
use crate::ports::{PaymentRepository, ReservationRepository};

#[derive(Debug)]
pub struct CancelReservationInput {
    pub reservation_id: Uuid,
}

#[derive(Debug)]
pub struct CancelReservationOutput {
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
}

pub struct CancelReservation {
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl CancelReservation {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            reservations,
            payments,
        }
    }

    pub async fn execute(
        &self,
        input: CancelReservationInput,
    ) -> Result<CancelReservationOutput, CoreError> {
        let mut reservation = self.reservations.find_by_id(input.reservation_id).await?;

        let payments_discarded = reservation.payments.len();
        transitions::cancel(&mut reservation);
        // Keep the payment store in step with the cleared aggregate list;
        // later payments validate against whatever rows remain.
        self.payments
            .delete_by_reservation_id(reservation.id)
            .await?;
        let saved = self.reservations.save(&reservation).await?;

        tracing::info!(
            reservation_id = %saved.id,
            payments_discarded,
            "reservation cancelled"
        );

        Ok(CancelReservationOutput {
            reservation_id: saved.id,
            status: saved.status,
        })
    }
}
