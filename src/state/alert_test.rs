use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = AlertState::default();
    let first = state.push(Alert::error("a", "b"));
    let second = state.push(Alert::default());
    assert!(second > first);
    assert_eq!(state.alerts.len(), 2);
    assert_eq!(state.alerts.last().map(|entry| entry.id), Some(second));
}

#[test]
fn dismiss_removes_only_matching_entry() {
    let mut state = AlertState::default();
    let keep = state.push(Alert::error("keep", ""));
    let drop = state.push(Alert::error("drop", ""));
    state.dismiss(drop);
    state.dismiss(999);
    assert_eq!(state.alerts.len(), 1);
    assert_eq!(state.alerts[0].id, keep);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = AlertState::default();
    let id = state.push(Alert::default());
    state.dismiss(id);
    assert_ne!(state.push(Alert::default()), id);
}

#[test]
fn error_constructor_sets_type() {
    let alert = Alert::error("Error", "boom");
    assert_eq!(alert.alert_type, AlertType::Error);
    assert_eq!(alert.alert_type.as_str(), "error");
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.description, "boom");
}
