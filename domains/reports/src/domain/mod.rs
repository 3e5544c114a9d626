//! Reports domain types

pub mod period;
pub mod status;
