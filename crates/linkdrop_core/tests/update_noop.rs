use linkdrop_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let before = state.view();
    let (next, effects) = update(state, Msg::NoOp);

    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_dirty_state() {
    let (mut next, effects) = update(AppState::new(), Msg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
