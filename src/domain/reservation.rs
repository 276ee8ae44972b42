//! Reservation aggregate.
//! Owns the payment list for one booking of one space on one calendar date
//! and answers the money-balance questions derived from it.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Payment, Space};
use crate::error::CoreError;

/// Lifecycle status of a reservation. The serialized strings are part of the
/// public contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    AwaitingDeposit,
    Confirmed,
    Settled,
    Cancelled,
    Finalized,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::AwaitingDeposit => "AWAITING_DEPOSIT",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Settled => "SETTLED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Finalized => "FINALIZED",
        }
    }

    /// Active statuses occupy their space/date; `CANCELLED` and `FINALIZED`
    /// do not.
    pub fn is_active(&self) -> bool {
        !matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Finalized
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub space_id: Uuid,
    pub event_date: NaiveDate,
    pub total_price: Money,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    /// Append-only from the aggregate's point of view. Cleared only by
    /// cancellation (see `domain::transitions::cancel`).
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        user_id: Uuid,
        space_id: Uuid,
        event_date: NaiveDate,
        total_price: Money,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            space_id,
            event_date,
            total_price,
            status: ReservationStatus::AwaitingDeposit,
            notes,
            payments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check this reservation against the space it claims to book.
    /// The space comes from an external lookup, so absence is an error here
    /// rather than at the call site.
    pub fn validate(&self, space: Option<&Space>) -> Result<(), CoreError> {
        let space = space.ok_or(CoreError::MissingSpace)?;
        if !space.active {
            return Err(CoreError::InactiveSpace(space.id));
        }
        if self.total_price != space.daily_price {
            return Err(CoreError::WrongTotal {
                expected: space.daily_price.format(),
                received: self.total_price.format(),
            });
        }
        Ok(())
    }

    pub fn total_paid(&self) -> Money {
        self.payments
            .iter()
            .fold(Money::zero(), |acc, payment| acc.add(&payment.amount))
    }

    /// Remaining amount owed. The payment policy keeps `total_paid` within
    /// `total_price`, so this only fails if the aggregate was corrupted
    /// outside the core.
    pub fn balance(&self) -> Result<Money, CoreError> {
        self.total_price.subtract(&self.total_paid())
    }

    pub fn is_settled(&self) -> bool {
        self.status == ReservationStatus::Settled && self.total_paid() == self.total_price
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Enforce the result of an availability lookup (see
    /// `services::AvailabilityChecker`, which performs the actual query).
    pub fn check_availability(&self, is_available: bool) -> Result<(), CoreError> {
        if !is_available {
            return Err(CoreError::SpaceUnavailable {
                space_id: self.space_id,
                event_date: self.event_date,
            });
        }
        Ok(())
    }

    pub fn record_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }
}
