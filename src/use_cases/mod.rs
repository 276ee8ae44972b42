pub mod cancel_reservation;
pub mod create_reservation;
pub mod record_payment;
pub mod update_reservation;

pub use cancel_reservation::{CancelReservation, CancelReservationInput, CancelReservationOutput};
pub use create_reservation::{
    CreateReservation, CreateReservationInput, CreateReservationOutput,
};
pub use record_payment::{RecordPayment, RecordPaymentInput, RecordPaymentOutput};
pub use update_reservation::{
    UpdateReservation, UpdateReservationInput, UpdateReservationOutput,
};
