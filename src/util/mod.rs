//! Pure helpers for routes and URL query strings.

pub mod link_resolver;
pub mod search_params;
