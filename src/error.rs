use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{PaymentKind, ReservationStatus};
use crate::ports::RepositoryError;

/// Every failure the core can report to its caller.
///
/// Business-rule violations and not-found lookups are expected, deterministic
/// outcomes and carry a human-readable message; repository failures pass
/// through unchanged for the calling adapter to translate. Nothing is retried
/// or swallowed internally.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount subtraction would produce a negative value")]
    NegativeResult,

    #[error("reservation has no space attached")]
    MissingSpace,

    #[error("space {0} is not active")]
    InactiveSpace(Uuid),

    #[error("total price mismatch: expected {expected}, received {received}")]
    WrongTotal { expected: String, received: String },

    #[error("space {space_id} is unavailable on {event_date}")]
    SpaceUnavailable {
        space_id: Uuid,
        event_date: NaiveDate,
    },

    #[error("cannot reprice below the amount already paid: new total {new_total}, already paid {total_paid}")]
    RepriceBelowPaid {
        new_total: String,
        total_paid: String,
    },

    #[error("reservation is not active (status {0})")]
    InactiveReservation(ReservationStatus),

    #[error("payment has no reservation attached")]
    MissingReservation,

    #[error("payment has no amount")]
    MissingAmount,

    #[error("payment has no kind")]
    MissingKind,

    #[error("a {0} payment must be the first payment on the reservation")]
    NotFirstPayment(PaymentKind),

    #[error("deposit must be half of the total price: expected {expected}, received {received}")]
    WrongDepositAmount { expected: String, received: String },

    #[error("full payment must cover the total price: expected {expected}, received {received}")]
    WrongFullAmount { expected: String, received: String },

    #[error("settlement requires exactly one prior deposit")]
    DepositRequiredFirst,

    #[error("reservation is already settled")]
    AlreadySettled,

    #[error("settlement must cover the remaining balance: expected {expected}, received {received}")]
    WrongSettlementAmount { expected: String, received: String },

    #[error("no status transition mapped for payment kind {0}")]
    NoTransitionForKind(PaymentKind),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        CoreError::NotFound { entity, id }
    }

    /// True for the business-rule family (bad input or a timing conflict),
    /// false for not-found and repository failures.
    pub fn is_business_rule(&self) -> bool {
        !matches!(
            self,
            CoreError::NotFound { .. } | CoreError::Repository(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_total_message_carries_both_amounts() {
        let err = CoreError::WrongTotal {
            expected: "R$ 300.00".to_string(),
            received: "R$ 250.00".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("R$ 300.00"));
        assert!(message.contains("R$ 250.00"));
    }

    #[test]
    fn not_found_is_not_a_business_rule() {
        let err = CoreError::not_found("space", Uuid::new_v4());
        assert!(!err.is_business_rule());
        assert!(CoreError::AlreadySettled.is_business_rule());
    }

    #[test]
    fn repository_errors_pass_through() {
        let err: CoreError = RepositoryError::Storage("connection reset".to_string()).into();
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_business_rule());
    }
}
