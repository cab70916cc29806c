pub mod appointments;
pub mod calendar;
pub mod doctors;
pub mod slots;
