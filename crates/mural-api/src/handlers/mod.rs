//! Route handlers
//!
//! All HTTP request handlers organized by audience.

pub mod admin;
pub mod health;
pub mod murals;
