pub mod memory;

pub use memory::{
    InMemoryPaymentRepository, InMemoryReservationRepository, InMemorySpaceRepository,
    InMemoryUserRepository,
};
