//! mockall doubles for the engine's store traits.

pub mod stores;

pub use stores::{MockAppointments, MockAvailability, MockCalendar, MockDoctors};
