//! API data models.

pub mod booking;
pub mod hotel;
pub mod review;
pub mod room;
pub mod session;
pub mod user;
