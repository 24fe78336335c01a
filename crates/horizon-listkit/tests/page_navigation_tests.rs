//! Integration tests for page navigation and scroll settling.

mod common;

use std::sync::Arc;
use std::time::Duration;

use horizon_listkit::{ElementFilter, Key, KeyEvent, KeyboardModifiers, PageNavigation};

use common::{numbered_list, record};

fn settle(list: &mut horizon_listkit::List<usize>, clock: &horizon_listkit::ManualClock) {
    clock.advance(Duration::from_millis(1));
    list.process_timers();
}

#[test]
fn test_next_page_focuses_last_visible_then_scrolls() {
    let (mut list, clock) = numbered_list(20);

    assert_eq!(list.focus_next_page(None, None), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[4]);
    assert_eq!(list.scroll_top(), 0.0);

    assert_eq!(list.focus_next_page(None, None), PageNavigation::AwaitingScroll);
    assert!(list.has_pending_page());
    assert!(list.get_focus().is_empty());
    assert_eq!(list.scroll_top(), 100.0);

    settle(&mut list, &clock);
    assert!(!list.has_pending_page());
    assert_eq!(list.get_focus(), &[9]);
}

#[test]
fn test_next_page_at_bottom_stays_on_last_row() {
    let (mut list, _clock) = numbered_list(20);
    list.set_scroll_top(300.0);
    list.set_focus(vec![19], None).unwrap();

    assert_eq!(list.focus_next_page(None, None), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[19]);
    assert_eq!(list.scroll_top(), 300.0);
    assert!(!list.has_pending_page());
}

#[test]
fn test_previous_page_mirrors_next_page() {
    let (mut list, clock) = numbered_list(20);
    list.set_scroll_top(300.0);
    list.set_focus(vec![19], None).unwrap();

    assert_eq!(list.focus_previous_page(None, None, 0.0), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[15]);

    assert_eq!(
        list.focus_previous_page(None, None, 0.0),
        PageNavigation::AwaitingScroll
    );
    assert_eq!(list.scroll_top(), 200.0);

    settle(&mut list, &clock);
    assert_eq!(list.get_focus(), &[10]);
}

#[test]
fn test_previous_page_at_top_keeps_first_row() {
    let (mut list, _clock) = numbered_list(20);
    list.set_focus(vec![0], None).unwrap();
    let focus_events = record(list.on_did_change_focus());

    assert_eq!(list.focus_previous_page(None, None, 0.0), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[0]);
    assert!(focus_events.lock().is_empty());
}

#[test]
fn test_host_settle_resumes_step() {
    let (mut list, _clock) = numbered_list(20);
    list.set_focus(vec![4], None).unwrap();
    list.focus_next_page(None, None);

    assert_eq!(list.on_scroll_settled(), Some(PageNavigation::Done));
    assert_eq!(list.get_focus(), &[9]);

    // Nothing left to resume.
    assert_eq!(list.on_scroll_settled(), None);
    list.process_timers();
    assert_eq!(list.get_focus(), &[9]);
}

#[test]
fn test_filter_survives_the_scroll() {
    let (mut list, clock) = numbered_list(20);
    let even: ElementFilter<usize> = Arc::new(|n: &usize| n % 2 == 0);
    list.set_focus(vec![4], None).unwrap();

    assert_eq!(
        list.focus_next_page(None, Some(even)),
        PageNavigation::AwaitingScroll
    );
    settle(&mut list, &clock);

    assert_eq!(list.get_focus(), &[8]);
}

#[test]
fn test_filter_picks_last_accepted_row() {
    let (mut list, _clock) = numbered_list(20);
    let odd: ElementFilter<usize> = Arc::new(|n: &usize| n % 2 == 1);

    assert_eq!(list.focus_next_page(None, Some(odd)), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[3]);
}

#[test]
fn test_new_page_step_cancels_pending_one() {
    let (mut list, clock) = numbered_list(20);
    list.set_focus(vec![4], None).unwrap();
    assert_eq!(list.focus_next_page(None, None), PageNavigation::AwaitingScroll);

    assert_eq!(list.focus_previous_page(None, None, 0.0), PageNavigation::Done);
    assert_eq!(list.get_focus(), &[5]);
    assert!(!list.has_pending_page());

    settle(&mut list, &clock);
    assert_eq!(list.get_focus(), &[5]);
    assert_eq!(list.time_until_next_timer(), None);
}

#[test]
fn test_page_down_key_moves_anchor_after_settle() {
    let (mut list, clock) = numbered_list(20);
    let page_down = KeyEvent::new(Key::PageDown, KeyboardModifiers::NONE);

    assert!(list.on_key_down(&page_down));
    assert_eq!(list.get_focus(), &[4]);
    assert_eq!(list.get_anchor(), Some(4));

    assert!(list.on_key_down(&page_down));
    assert!(list.has_pending_page());
    assert_eq!(list.get_anchor(), Some(4));

    settle(&mut list, &clock);
    assert_eq!(list.get_focus(), &[9]);
    assert_eq!(list.get_anchor(), Some(9));
    assert_eq!(list.scroll_top(), 100.0);
}

#[test]
fn test_page_up_key_from_bottom() {
    let (mut list, _clock) = numbered_list(20);
    list.set_scroll_top(300.0);
    list.set_focus(vec![18], None).unwrap();

    assert!(list.on_key_down(&KeyEvent::new(Key::PageUp, KeyboardModifiers::NONE)));
    assert_eq!(list.get_focus(), &[15]);
    assert_eq!(list.get_anchor(), Some(15));
}

#[test]
fn test_empty_list_is_done_immediately() {
    let (mut list, _clock) = numbered_list(0);
    assert_eq!(list.focus_next_page(None, None), PageNavigation::Done);
    assert_eq!(list.focus_previous_page(None, None, 0.0), PageNavigation::Done);
    assert!(list.get_focus().is_empty());
}
