//! Application-wide contexts provided at the app root and the issues layout.

pub mod libre311;
pub mod service_requests;
