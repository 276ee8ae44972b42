//! Record payment use case.
//! Loads the reservation with its payment history, runs the canonical
//! acceptance rule, persists the payment, then applies the mapped status
//! transition and persists the mutated aggregate — in that order. A FULL
//! payment is therefore stored before `NoTransitionForKind` surfaces.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{payment, transitions, Money, Payment, PaymentDraft, PaymentKind, ReservationStatus};
use crate::error::CoreError;
use crate::ports::{PaymentRepository, ReservationRepository};

#[derive(Debug, Default)]
pub struct RecordPaymentInput {
    pub reservation_id: Option<Uuid>,
    pub amount: Option<Money>,
    pub kind: Option<PaymentKind>,
    pub method: Option<String>,
    pub gateway_transaction_code: Option<String>,
}

#[derive(Debug)]
pub struct RecordPaymentOutput {
    pub payment_id: Uuid,
    pub reservation_id: Uuid,
    pub status: ReservationStatus,
    pub balance: Money,
}

pub struct RecordPayment {
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl RecordPayment {
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
        input: RecordPaymentInput,
    ) -> Result<RecordPaymentOutput, CoreError> {
        let reservation_id = input.reservation_id.ok_or(CoreError::MissingReservation)?;

        let mut reservation = self.reservations.find_by_id(reservation_id).await?;
        reservation.payments = self.payments.find_by_reservation_id(reservation_id).await?;

        let draft = PaymentDraft {
            reservation_id: Some(reservation_id),
            amount: input.amount,
            kind: input.kind,
            method: input.method,
            gateway_transaction_code: input.gateway_transaction_code,
        };
        let (amount, kind) = payment::validate(&draft, &reservation)?;

        let candidate = Payment::new(
            reservation_id,
            amount,
            kind,
            draft.method.unwrap_or_default(),
            draft.gateway_transaction_code,
        );
        let saved_payment = self.payments.save(&candidate).await?;

        let status = transitions::apply_after_payment(&mut reservation, kind)?;
        reservation.record_payment(saved_payment.clone());
        self.reservations.save(&reservation).await?;

        let balance = reservation.balance()?;
        tracing::info!(
            payment_id = %saved_payment.id,
            reservation_id = %reservation.id,
            kind = %kind,
            status = %status,
            balance = %balance,
            "payment recorded"
        );

        Ok(RecordPaymentOutput {
            payment_id: saved_payment.id,
            reservation_id: reservation.id,
            status,
            balance,
        })
    }
}
