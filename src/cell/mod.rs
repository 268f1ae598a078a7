//! Session state and the lifecycle controller that owns it.

pub mod controller;
pub mod state;
