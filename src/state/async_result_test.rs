use super::*;
use open311::Open311Error;

#[test]
fn default_is_in_progress() {
    let result: AsyncResult<u32> = AsyncResult::default();
    assert!(result.is_in_progress());
    assert!(result.success().is_none());
    assert!(result.failure().is_none());
}

#[test]
fn from_ok_is_success() {
    let result: AsyncResult<u32> = Ok(3).into();
    assert!(result.is_success());
    assert_eq!(result.success(), Some(&3));
}

#[test]
fn from_err_is_failure() {
    let err = Libre311Error::Api(Open311Error::Request("offline".to_owned()));
    let result: AsyncResult<u32> = Err(err.clone()).into();
    assert!(!result.is_success());
    assert_eq!(result.failure(), Some(&err));
}
