//! Integration tests for splice reconciliation.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use horizon_listkit::{List, ListError, ListOptions, MemoryRowSource};
use parking_lot::Mutex;

use common::{numbered_list, record, setup};

fn letters(items: &[&'static str], with_identity: bool) -> List<&'static str> {
    setup();
    let rows = MemoryRowSource::new(20.0, 100.0).with_items(items.to_vec());
    let mut options = ListOptions::new();
    if with_identity {
        options = options.with_identity_provider(|item: &&'static str| item.to_string());
    }
    List::new("letters", rows, options)
}

#[test]
fn test_new_items_do_not_take_over_selection() {
    let mut list = letters(&["A", "B", "C", "D"], true);
    list.set_selection(vec![1, 3], None).unwrap();

    let removed = list.splice(1, 1, vec!["X", "Y"]).unwrap();

    assert_eq!(removed, vec!["B"]);
    assert_eq!(list.get_selection(), &[4]);
    assert_eq!(list.selected_elements(), vec![&"D"]);
}

#[test]
fn test_moved_item_keeps_selection_and_focus() {
    let mut list = letters(&["A", "B", "C", "D"], true);
    list.set_selection(vec![1], None).unwrap();
    list.set_focus(vec![1], None).unwrap();

    list.splice(1, 3, vec!["C", "D", "B"]).unwrap();

    assert_eq!(list.get_selection(), &[3]);
    assert_eq!(list.get_focus(), &[3]);
    assert_eq!(list.focused_elements(), vec![&"B"]);
}

#[test]
fn test_without_identity_reinserted_item_is_dropped() {
    let mut list = letters(&["A", "B", "C", "D"], false);
    list.set_selection(vec![1], None).unwrap();

    list.splice(1, 3, vec!["C", "D", "B"]).unwrap();

    assert!(list.get_selection().is_empty());
}

#[test]
fn test_insert_before_shifts_everything() {
    let (mut list, _clock) = numbered_list(5);
    list.set_focus(vec![2], None).unwrap();
    list.set_selection(vec![0, 2, 4], None).unwrap();
    list.set_anchor(Some(4)).unwrap();

    list.splice(1, 0, vec![100, 101]).unwrap();

    assert_eq!(list.get_focus(), &[4]);
    assert_eq!(list.get_selection(), &[0, 4, 6]);
    assert_eq!(list.get_anchor(), Some(6));
    assert_eq!(list.length(), 7);
}

#[test]
fn test_empty_splice_is_a_no_op() {
    let (mut list, _clock) = numbered_list(3);
    list.set_selection(vec![1], None).unwrap();
    let selection_events = record(list.on_did_change_selection());

    assert!(list.splice(1, 0, Vec::new()).unwrap().is_empty());
    assert!(selection_events.lock().is_empty());
}

#[test]
fn test_invalid_range_leaves_state_untouched() {
    let (mut list, _clock) = numbered_list(3);
    list.set_selection(vec![2], None).unwrap();

    let err = list.splice(1, 3, Vec::new()).unwrap_err();
    assert_eq!(err, ListError::invalid_range("tests", 1, 3, 3));
    assert_eq!(err.to_string(), "[tests] Invalid splice range: start 1, delete count 3 (length 3)");
    assert_eq!(list.get_selection(), &[2]);
    assert_eq!(list.length(), 3);
}

#[test]
fn test_one_notification_per_trait_with_final_state() {
    let (mut list, _clock) = numbered_list(6);
    list.set_focus(vec![5], None).unwrap();
    list.set_selection(vec![4, 5], None).unwrap();
    list.set_anchor(Some(4)).unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    for (name, signal) in [
        ("focus", list.on_did_change_focus()),
        ("selection", list.on_did_change_selection()),
        ("anchor", list.on_did_change_anchor()),
    ] {
        let order = order.clone();
        signal.connect(move |event| order.lock().push((name, event.indices.clone())));
    }

    list.splice(0, 3, Vec::new()).unwrap();

    assert_eq!(
        *order.lock(),
        vec![
            ("focus", vec![2]),
            ("selection", vec![1, 2]),
            ("anchor", vec![1]),
        ]
    );
}

#[test]
fn test_content_height_signal() {
    let (mut list, _clock) = numbered_list(3);
    let heights = Arc::new(Mutex::new(Vec::new()));
    let heights_clone = heights.clone();
    list.on_did_change_content_height()
        .connect(move |&height| heights_clone.lock().push(height));

    list.splice(3, 0, vec![3, 4]).unwrap();
    list.splice(0, 1, vec![9]).unwrap();

    assert_eq!(*heights.lock(), vec![100.0]);
    assert_eq!(list.content_height(), 100.0);
}

/// Small deterministic generator so the splice sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

#[test]
fn test_random_splices_track_identity() {
    setup();
    let initial: Vec<u32> = (0..30).collect();
    let rows = MemoryRowSource::new(20.0, 100.0).with_items(initial.clone());
    let options = ListOptions::new().with_identity_provider(|id: &u32| id.to_string());
    let mut list = List::new("random", rows, options);

    let mut model = initial;
    let mut selected: HashSet<u32> = [1, 2, 3, 10, 20, 29].into_iter().collect();
    let indices: Vec<usize> = model
        .iter()
        .enumerate()
        .filter(|(_, id)| selected.contains(id))
        .map(|(i, _)| i)
        .collect();
    list.set_selection(indices, None).unwrap();

    let mut rng = Lcg(7);
    let mut next_id = 1000u32;

    for _ in 0..200 {
        let len = model.len();
        let start = rng.next(len + 1);
        let delete_count = rng.next(len - start + 1).min(4);
        let deleted: Vec<u32> = model[start..start + delete_count].to_vec();

        // Re-insert some deleted ids (moves) and some fresh ones.
        let mut inserted = Vec::new();
        for &id in &deleted {
            if rng.next(2) == 0 {
                inserted.push(id);
            }
        }
        for _ in 0..rng.next(3) {
            inserted.push(next_id);
            next_id += 1;
        }

        let kept: HashSet<u32> = inserted
            .iter()
            .copied()
            .filter(|id| selected.contains(id))
            .collect();
        for id in &deleted {
            selected.remove(id);
        }
        selected.extend(kept);

        model.splice(start..start + delete_count, inserted.clone());
        list.splice(start, delete_count, inserted).unwrap();

        let sorted = list.get_selection().to_vec();
        assert!(sorted.windows(2).all(|w| w[0] < w[1]), "not ascending: {sorted:?}");
        assert!(sorted.iter().all(|&i| i < list.length()));

        let actual: HashSet<u32> = sorted.iter().map(|&i| model[i]).collect();
        assert_eq!(actual, selected);
    }
}
