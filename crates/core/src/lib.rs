//! # SlotBook Core
//!
//! Appointment scheduling engine: slot generation, calendar grid, doctor
//! search, and the booking coordinator that commits each slot at most once.
//! Persistence and calendar integration are reached only through the traits
//! in [`store`].

pub mod booking;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod models;
pub mod search;
pub mod slots;
pub mod store;
