//! Framework-agnostic domain entities and rules.

pub mod money;
pub mod payment;
pub mod reservation;
pub mod space;
pub mod transitions;
pub mod user;

pub use money::Money;
pub use payment::{Payment, PaymentDraft, PaymentKind};
pub use reservation::{Reservation, ReservationStatus};
pub use space::Space;
pub use user::{User, UserRole};
