pub mod availability;
pub mod block;
pub mod booking;
pub mod booking_management;
pub mod health;
pub mod inventory;
pub mod service;
