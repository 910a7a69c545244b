//! Plain state types held inside reactive signals.

pub mod alert;
pub mod async_result;
