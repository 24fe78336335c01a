//! Integration tests for pointer and keyboard selection through the list.

mod common;

use std::sync::Arc;

use horizon_listkit::{
    InputEvent, Key, KeyEvent, KeyboardModifiers, List, ListOptions, ListOptionsUpdate,
    ManualClock, MarkerUpdate, MouseButton, PointerEvent, RowHandle,
};
use parking_lot::Mutex;

use common::{numbered_list, numbered_rows, record, setup};

fn command() -> KeyboardModifiers {
    if cfg!(target_os = "macos") {
        KeyboardModifiers::META
    } else {
        KeyboardModifiers::CTRL
    }
}

fn toggle(index: usize) -> PointerEvent {
    PointerEvent::new(Some(index), command())
}

fn range(index: usize) -> PointerEvent {
    PointerEvent::new(Some(index), KeyboardModifiers::SHIFT)
}

#[test]
fn test_toggle_keeps_other_rows() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(2)).unwrap();
    list.on_pointer(&range(4)).unwrap();
    assert_eq!(list.get_selection(), &[2, 3, 4]);

    list.on_pointer(&toggle(3)).unwrap();
    assert_eq!(list.get_selection(), &[2, 4]);
    assert_eq!(list.get_focus(), &[3]);
    assert_eq!(list.get_anchor(), Some(3));

    list.on_pointer(&toggle(3)).unwrap();
    assert_eq!(list.get_selection(), &[2, 4, 3]);
}

#[test]
fn test_range_replaces_run_around_anchor() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(2)).unwrap();

    list.on_pointer(&range(5)).unwrap();
    assert_eq!(list.get_selection(), &[2, 3, 4, 5]);
    list.on_pointer(&range(5)).unwrap();
    assert_eq!(list.get_selection(), &[2, 3, 4, 5]);

    list.on_pointer(&range(0)).unwrap();
    assert_eq!(list.get_selection(), &[0, 1, 2]);
    assert_eq!(list.get_focus(), &[0]);
    assert_eq!(list.get_anchor(), Some(2));
}

#[test]
fn test_range_keeps_disjoint_runs() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(1)).unwrap();
    list.on_pointer(&toggle(7)).unwrap();

    list.on_pointer(&range(9)).unwrap();
    assert_eq!(list.get_selection(), &[1, 7, 8, 9]);
}

#[test]
fn test_range_without_anchor_starts_at_focus() {
    let (mut list, _clock) = numbered_list(10);
    list.set_focus(vec![3], None).unwrap();

    list.on_pointer(&range(5)).unwrap();
    assert_eq!(list.get_anchor(), Some(3));
    assert_eq!(list.get_selection(), &[3, 4, 5]);
    assert_eq!(list.get_focus(), &[5]);
}

#[test]
fn test_click_on_empty_space_clears_everything() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(1)).unwrap();
    list.on_pointer(&range(3)).unwrap();

    list.on_pointer(&PointerEvent::new(None, KeyboardModifiers::NONE))
        .unwrap();
    assert!(list.get_focus().is_empty());
    assert!(list.get_selection().is_empty());
    assert_eq!(list.get_anchor(), None);
}

#[test]
fn test_right_click_and_context_menu_keep_selection() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(2)).unwrap();

    list.on_pointer(&PointerEvent::click(4).with_button(MouseButton::Right))
        .unwrap();
    assert_eq!(list.get_focus(), &[4]);
    assert_eq!(list.get_anchor(), Some(4));
    assert_eq!(list.get_selection(), &[2]);

    list.on_context_menu(&PointerEvent::click(6)).unwrap();
    assert_eq!(list.get_focus(), &[6]);
    assert_eq!(list.get_selection(), &[2]);
}

#[test]
fn test_double_click_selects_focus() {
    let (mut list, _clock) = numbered_list(10);
    list.on_pointer(&PointerEvent::click(2)).unwrap();
    list.on_pointer(&toggle(5)).unwrap();
    assert_eq!(list.get_selection(), &[2, 5]);

    // A modified double click is left alone.
    list.on_double_click(&toggle(5)).unwrap();
    assert_eq!(list.get_selection(), &[2, 5]);

    list.on_double_click(&PointerEvent::click(5)).unwrap();
    assert_eq!(list.get_selection(), &[5]);
}

#[test]
fn test_pointer_handled_only_for_plain_presses() {
    let (mut list, _clock) = numbered_list(10);
    let handled = Arc::new(Mutex::new(Vec::new()));
    let handled_clone = handled.clone();
    list.on_pointer_handled()
        .connect(move |event| handled_clone.lock().push(event.index));

    list.on_pointer(&PointerEvent::click(1)).unwrap();
    list.on_pointer(&toggle(2)).unwrap();
    list.on_pointer(&range(4)).unwrap();
    list.on_pointer(&PointerEvent::new(None, KeyboardModifiers::NONE))
        .unwrap();
    list.on_pointer(&PointerEvent::click(3)).unwrap();

    assert_eq!(*handled.lock(), vec![Some(1), Some(3)]);
}

#[test]
fn test_selection_event_carries_pointer_origin() {
    let (mut list, _clock) = numbered_list(10);
    let origins = Arc::new(Mutex::new(Vec::new()));
    let origins_clone = origins.clone();
    list.on_did_change_selection()
        .connect(move |event| origins_clone.lock().push(event.origin.clone()));

    let click = PointerEvent::click(8);
    list.on_pointer(&click).unwrap();

    assert_eq!(*origins.lock(), vec![Some(InputEvent::Pointer(click))]);
}

#[test]
fn test_mouse_support_toggles_at_runtime() {
    let (mut list, _clock) = numbered_list(10);
    let selection_events = record(list.on_did_change_selection());

    list.update_options(ListOptionsUpdate {
        mouse_support: Some(false),
        ..Default::default()
    });
    list.on_pointer(&PointerEvent::click(1)).unwrap();
    list.on_context_menu(&PointerEvent::click(1)).unwrap();
    assert!(list.get_focus().is_empty());
    assert!(selection_events.lock().is_empty());

    list.update_options(ListOptionsUpdate {
        mouse_support: Some(true),
        ..Default::default()
    });
    list.on_pointer(&PointerEvent::click(1)).unwrap();
    assert_eq!(*selection_events.lock(), vec![vec![1]]);
}

#[test]
fn test_single_selection_treats_modifiers_as_plain_click() {
    setup();
    let options = ListOptions::new()
        .with_clock(ManualClock::shared())
        .with_multiple_selection_support(false);
    let mut list = List::new("single", numbered_rows(10), options);

    list.on_pointer(&PointerEvent::click(2)).unwrap();
    list.on_pointer(&toggle(5)).unwrap();
    assert_eq!(list.get_selection(), &[5]);
    list.on_pointer(&range(7)).unwrap();
    assert_eq!(list.get_selection(), &[7]);

    let select_all = KeyEvent::new(Key::Character('a'), command());
    assert!(!list.on_key_down(&select_all));
    assert_eq!(list.get_selection(), &[7]);

    let escape = KeyEvent::new(Key::Escape, KeyboardModifiers::NONE);
    assert!(list.on_key_down(&escape));
    assert!(list.get_selection().is_empty());
    assert!(!list.on_key_down(&escape));
}

#[test]
fn test_select_all_and_escape() {
    let (mut list, _clock) = numbered_list(6);
    list.on_pointer(&PointerEvent::click(2)).unwrap();

    assert!(list.on_key_down(&KeyEvent::new(Key::Character('a'), command())));
    assert_eq!(list.get_selection(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(list.get_anchor(), None);
    assert_eq!(list.get_focus(), &[2]);

    assert!(list.on_key_down(&KeyEvent::new(Key::Escape, KeyboardModifiers::NONE)));
    assert!(list.get_selection().is_empty());
}

#[test]
fn test_markers_follow_selection() {
    setup();
    let updates: Arc<Mutex<Vec<MarkerUpdate>>> = Arc::new(Mutex::new(Vec::new()));
    let updates_clone = updates.clone();
    let options = ListOptions::new()
        .with_clock(ManualClock::shared())
        .with_marker_renderer(move |update: MarkerUpdate| updates_clone.lock().push(update));
    let mut list = List::new("markers", numbered_rows(10), options);

    for i in 0..3 {
        list.render_row(RowHandle(i as u64), i);
    }
    list.on_pointer(&PointerEvent::click(1)).unwrap();
    updates.lock().clear();

    list.on_pointer(&PointerEvent::click(2)).unwrap();

    let mut selected: Vec<MarkerUpdate> = updates
        .lock()
        .iter()
        .copied()
        .filter(|u| u.trait_name == "selected")
        .collect();
    selected.sort_by_key(|u| u.index);
    assert_eq!(
        selected,
        vec![
            MarkerUpdate {
                trait_name: "selected",
                row: RowHandle(1),
                index: 1,
                active: false,
                aria_selected: Some(false),
            },
            MarkerUpdate {
                trait_name: "selected",
                row: RowHandle(2),
                index: 2,
                active: true,
                aria_selected: Some(true),
            },
        ]
    );
    assert!(
        updates
            .lock()
            .iter()
            .filter(|u| u.trait_name != "selected")
            .all(|u| u.aria_selected.is_none())
    );

    // Rows the host released no longer receive updates.
    list.dispose_row(RowHandle(2));
    updates.lock().clear();
    list.on_pointer(&PointerEvent::click(0)).unwrap();
    assert!(updates.lock().iter().all(|u| u.row != RowHandle(2)));
    assert!(updates.lock().iter().any(|u| u.row == RowHandle(0) && u.active));
}
