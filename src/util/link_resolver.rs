//! Route paths for issue pages.

#[cfg(test)]
#[path = "link_resolver_test.rs"]
mod link_resolver_test;

use open311::ServiceRequestId;

pub const ISSUES_MAP_PATH: &str = "/issues/map";

/// Which issues page a pathname addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssuesRoute {
    Map,
    Detail(ServiceRequestId),
    /// A detail path whose id segment is not a request id.
    InvalidDetail(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkResolver;

impl LinkResolver {
    #[must_use]
    pub fn issues_map(&self) -> &'static str {
        ISSUES_MAP_PATH
    }

    #[must_use]
    pub fn issue_details(&self, id: ServiceRequestId) -> String {
        format!("{ISSUES_MAP_PATH}/{id}")
    }

    /// Classify `pathname`; anything that is not a detail path is the map.
    #[must_use]
    pub fn classify(&self, pathname: &str) -> IssuesRoute {
        let trimmed = pathname.trim_end_matches('/');
        let Some(rest) = trimmed.strip_prefix(ISSUES_MAP_PATH).and_then(|rest| rest.strip_prefix('/')) else {
            return IssuesRoute::Map;
        };
        match rest.parse::<ServiceRequestId>() {
            Ok(id) => IssuesRoute::Detail(id),
            Err(_) => IssuesRoute::InvalidDetail(rest.to_owned()),
        }
    }
}
