//! Payment record and the canonical payment-acceptance policy.
//!
//! A payment is only meaningful against its reservation's current payment
//! history, so the policy is a pure function over a candidate draft and the
//! loaded aggregate. The reservation owns the payment list; a payment keeps
//! a read-only id back-reference and never mutates its siblings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Reservation};
use crate::error::CoreError;

/// Payment kind. The serialized strings are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    /// First payment, fixed at half of the reservation total.
    Deposit,
    /// Second payment covering the remaining balance after a deposit.
    Settlement,
    /// Single payment covering the whole total, instead of deposit+settlement.
    Full,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Deposit => "DEPOSIT",
            PaymentKind::Settlement => "SETTLEMENT",
            PaymentKind::Full => "FULL",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    /// Non-owning back-reference; the reservation owns the collection.
    pub reservation_id: Uuid,
    pub amount: Money,
    pub kind: PaymentKind,
    /// Free-text label such as "pix" or "card".
    pub method: String,
    /// Opaque gateway transaction code; stored, never interpreted.
    pub gateway_transaction_code: Option<String>,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        reservation_id: Uuid,
        amount: Money,
        kind: PaymentKind,
        method: String,
        gateway_transaction_code: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            reservation_id,
            amount,
            kind,
            method,
            gateway_transaction_code,
            paid_at: Utc::now(),
        }
    }
}

/// Candidate payment as submitted by the caller, before any field has been
/// checked. Presence errors (`MissingReservation`, `MissingAmount`,
/// `MissingKind`) are raised here rather than at the transport boundary.
#[derive(Debug, Clone, Default)]
pub struct PaymentDraft {
    pub reservation_id: Option<Uuid>,
    pub amount: Option<Money>,
    pub kind: Option<PaymentKind>,
    pub method: Option<String>,
    pub gateway_transaction_code: Option<String>,
}

/// The canonical acceptance rule: kind-specific amounts plus sequencing over
/// the reservation's current payment list. Returns the checked amount and
/// kind so the caller can construct the `Payment` without re-unwrapping.
///
/// The kind-specific amounts keep `total_paid` within `total_price`, so the
/// aggregate invariant needs no separate running-total check.
pub fn validate(
    draft: &PaymentDraft,
    reservation: &Reservation,
) -> Result<(Money, PaymentKind), CoreError> {
    if draft.reservation_id.is_none() {
        return Err(CoreError::MissingReservation);
    }
    let amount = draft.amount.clone().ok_or(CoreError::MissingAmount)?;
    let kind = draft.kind.ok_or(CoreError::MissingKind)?;

    // Cancelled and finalized reservations accept no further payments; a
    // cancelled one has an empty history and would otherwise take a fresh
    // deposit and come back to life as CONFIRMED.
    if !reservation.is_active() {
        return Err(CoreError::InactiveReservation(reservation.status));
    }

    match kind {
        PaymentKind::Deposit => {
            if !reservation.payments.is_empty() {
                return Err(CoreError::NotFirstPayment(kind));
            }
            let expected = reservation.total_price.half();
            if amount != expected {
                return Err(CoreError::WrongDepositAmount {
                    expected: expected.format(),
                    received: amount.format(),
                });
            }
        }
        PaymentKind::Full => {
            if !reservation.payments.is_empty() {
                return Err(CoreError::NotFirstPayment(kind));
            }
            if amount != reservation.total_price {
                return Err(CoreError::WrongFullAmount {
                    expected: reservation.total_price.format(),
                    received: amount.format(),
                });
            }
        }
        PaymentKind::Settlement => {
            if reservation
                .payments
                .iter()
                .any(|p| p.kind == PaymentKind::Settlement)
            {
                return Err(CoreError::AlreadySettled);
            }
            let deposits: Vec<&Payment> = reservation
                .payments
                .iter()
                .filter(|p| p.kind == PaymentKind::Deposit)
                .collect();
            let [deposit] = deposits.as_slice() else {
                return Err(CoreError::DepositRequiredFirst);
            };
            let expected = reservation.total_price.subtract(&deposit.amount)?;
            if amount != expected {
                return Err(CoreError::WrongSettlementAmount {
                    expected: expected.format(),
                    received: amount.format(),
                });
            }
        }
    }

    Ok((amount, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reservation(total: &str) -> Reservation {
        Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            Money::of(total).unwrap(),
            None,
        )
    }

    fn draft(reservation: &Reservation, amount: &str, kind: PaymentKind) -> PaymentDraft {
        PaymentDraft {
            reservation_id: Some(reservation.id),
            amount: Some(Money::of(amount).unwrap()),
            kind: Some(kind),
            method: Some("pix".to_string()),
            gateway_transaction_code: None,
        }
    }

    fn pay(reservation: &mut Reservation, amount: &str, kind: PaymentKind) {
        let payment = Payment::new(
            reservation.id,
            Money::of(amount).unwrap(),
            kind,
            "pix".to_string(),
            None,
        );
        reservation.record_payment(payment);
    }

    #[test]
    fn missing_fields_are_rejected_in_order() {
        let reservation = reservation("300.00");
        let empty = PaymentDraft::default();
        assert!(matches!(
            validate(&empty, &reservation),
            Err(CoreError::MissingReservation)
        ));

        let mut no_amount = PaymentDraft::default();
        no_amount.reservation_id = Some(reservation.id);
        assert!(matches!(
            validate(&no_amount, &reservation),
            Err(CoreError::MissingAmount)
        ));

        let mut no_kind = no_amount.clone();
        no_kind.amount = Some(Money::of("150.00").unwrap());
        assert!(matches!(
            validate(&no_kind, &reservation),
            Err(CoreError::MissingKind)
        ));
    }

    #[test]
    fn deposit_must_be_half_of_the_total() {
        let reservation = reservation("300.00");
        assert!(validate(&draft(&reservation, "150.00", PaymentKind::Deposit), &reservation).is_ok());
        match validate(&draft(&reservation, "100.00", PaymentKind::Deposit), &reservation) {
            Err(CoreError::WrongDepositAmount { expected, received }) => {
                assert_eq!(expected, "R$ 150.00");
                assert_eq!(received, "R$ 100.00");
            }
            other => panic!("expected WrongDepositAmount, got {:?}", other),
        }
    }

    #[test]
    fn deposit_must_be_the_first_payment() {
        let mut reservation = reservation("300.00");
        pay(&mut reservation, "150.00", PaymentKind::Deposit);
        assert!(matches!(
            validate(&draft(&reservation, "150.00", PaymentKind::Deposit), &reservation),
            Err(CoreError::NotFirstPayment(PaymentKind::Deposit))
        ));
    }

    #[test]
    fn full_payment_must_match_the_total_and_come_first() {
        let reservation_a = reservation("300.00");
        assert!(validate(&draft(&reservation_a, "300.00", PaymentKind::Full), &reservation_a).is_ok());
        assert!(matches!(
            validate(&draft(&reservation_a, "299.99", PaymentKind::Full), &reservation_a),
            Err(CoreError::WrongFullAmount { .. })
        ));

        let mut reservation_b = reservation("300.00");
        pay(&mut reservation_b, "150.00", PaymentKind::Deposit);
        assert!(matches!(
            validate(&draft(&reservation_b, "300.00", PaymentKind::Full), &reservation_b),
            Err(CoreError::NotFirstPayment(PaymentKind::Full))
        ));
    }

    #[test]
    fn settlement_requires_exactly_one_prior_deposit() {
        let reservation_a = reservation("300.00");
        assert!(matches!(
            validate(&draft(&reservation_a, "150.00", PaymentKind::Settlement), &reservation_a),
            Err(CoreError::DepositRequiredFirst)
        ));

        let mut reservation_b = reservation("300.00");
        pay(&mut reservation_b, "150.00", PaymentKind::Deposit);
        assert!(
            validate(&draft(&reservation_b, "150.00", PaymentKind::Settlement), &reservation_b)
                .is_ok()
        );
    }

    #[test]
    fn settlement_must_cover_the_remaining_balance() {
        let mut reservation = reservation("300.00");
        pay(&mut reservation, "150.00", PaymentKind::Deposit);
        match validate(&draft(&reservation, "100.00", PaymentKind::Settlement), &reservation) {
            Err(CoreError::WrongSettlementAmount { expected, received }) => {
                assert_eq!(expected, "R$ 150.00");
                assert_eq!(received, "R$ 100.00");
            }
            other => panic!("expected WrongSettlementAmount, got {:?}", other),
        }
    }

    #[test]
    fn second_settlement_is_already_settled() {
        let mut reservation = reservation("300.00");
        pay(&mut reservation, "150.00", PaymentKind::Deposit);
        pay(&mut reservation, "150.00", PaymentKind::Settlement);
        assert!(matches!(
            validate(&draft(&reservation, "150.00", PaymentKind::Settlement), &reservation),
            Err(CoreError::AlreadySettled)
        ));
    }

    #[test]
    fn no_payment_is_accepted_on_an_inactive_reservation() {
        use crate::domain::ReservationStatus;

        let mut cancelled = reservation("300.00");
        cancelled.status = ReservationStatus::Cancelled;
        assert!(matches!(
            validate(&draft(&cancelled, "150.00", PaymentKind::Deposit), &cancelled),
            Err(CoreError::InactiveReservation(ReservationStatus::Cancelled))
        ));

        let mut finalized = reservation("300.00");
        finalized.status = ReservationStatus::Finalized;
        assert!(matches!(
            validate(&draft(&finalized, "300.00", PaymentKind::Full), &finalized),
            Err(CoreError::InactiveReservation(ReservationStatus::Finalized))
        ));
    }

    #[test]
    fn half_up_deposit_on_odd_totals() {
        // 100.01 / 2 rounds to 50.01; the settlement covers the 50.00 left.
        let mut reservation = reservation("100.01");
        assert!(validate(&draft(&reservation, "50.01", PaymentKind::Deposit), &reservation).is_ok());
        pay(&mut reservation, "50.01", PaymentKind::Deposit);
        assert!(
            validate(&draft(&reservation, "50.00", PaymentKind::Settlement), &reservation).is_ok()
        );
    }

    #[test]
    fn kind_strings_are_wire_exact() {
        assert_eq!(PaymentKind::Deposit.as_str(), "DEPOSIT");
        assert_eq!(PaymentKind::Settlement.as_str(), "SETTLEMENT");
        assert_eq!(PaymentKind::Full.as_str(), "FULL");
    }
}
