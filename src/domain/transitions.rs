//! Status transitions driven by accepted payments.
//!
//! A fixed mapping, not a runtime-discovered rule list: a deposit confirms
//! the reservation, a settlement settles it. `FULL` intentionally has no
//! mapped target, so recording one surfaces `NoTransitionForKind` instead of
//! silently leaving the status unchanged (pending product clarification).

use crate::domain::{PaymentKind, Reservation, ReservationStatus};
use crate::error::CoreError;

/// The status a reservation moves to after a payment of the given kind.
pub fn transition_for(kind: PaymentKind) -> Option<ReservationStatus> {
    match kind {
        PaymentKind::Deposit => Some(ReservationStatus::Confirmed),
        PaymentKind::Settlement => Some(ReservationStatus::Settled),
        PaymentKind::Full => None,
    }
}

/// Apply the mapped transition for an accepted payment.
pub fn apply_after_payment(
    reservation: &mut Reservation,
    kind: PaymentKind,
) -> Result<ReservationStatus, CoreError> {
    let next = transition_for(kind).ok_or(CoreError::NoTransitionForKind(kind))?;
    reservation.status = next;
    Ok(next)
}

/// Cancel the reservation. Destructive: the payment list is cleared, not
/// archived.
pub fn cancel(reservation: &mut Reservation) {
    reservation.status = ReservationStatus::Cancelled;
    reservation.payments.clear();
}
