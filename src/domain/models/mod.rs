pub mod booking;
pub mod calendar;
pub mod inventory;
pub mod service;
pub mod unavailable_block;
