//! Tri-state value for data that is loading, loaded or failed.

#[cfg(test)]
#[path = "async_result_test.rs"]
mod async_result_test;

use crate::net::Libre311Error;

/// Outcome of an async load. Starts as `InProgress`.
#[derive(Clone, Debug, PartialEq)]
pub enum AsyncResult<T, E = Libre311Error> {
    InProgress,
    Success(T),
    Failure(E),
}

impl<T, E> Default for AsyncResult<T, E> {
    fn default() -> Self {
        Self::InProgress
    }
}

impl<T, E> From<Result<T, E>> for AsyncResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> AsyncResult<T, E> {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&E> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}
