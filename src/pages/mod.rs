//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages own route-scoped orchestration: the issues layout bridges the router
//! into [`crate::context::service_requests`], and the login page drives the
//! UnityAuth bridge.

pub mod issues;
pub mod login;
