pub mod availability;
pub mod calendar;
pub mod date_range_selector;
