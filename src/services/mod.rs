pub mod availability;

pub use availability::AvailabilityChecker;
