//! Reusable view components.

pub mod alert_region;
