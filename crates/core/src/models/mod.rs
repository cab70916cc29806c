pub mod appointment;
pub mod calendar_event;
pub mod doctor;
pub mod time_slot;
