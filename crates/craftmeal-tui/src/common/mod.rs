pub mod calendar;
pub mod input;
