use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use testhub_grid::{SelectionMap, SelectionTracker, Shared};

fn keys(n: usize) -> Vec<String> {
    (1..=n).map(|i| i.to_string()).collect()
}

// ============================================================================
// Uncontrolled
// ============================================================================

#[test]
fn test_toggle_row_twice_restores_state() {
    let mut selection = SelectionTracker::uncontrolled();
    let before = selection.snapshot();

    selection.toggle_row("3");
    assert!(selection.is_selected("3"));

    selection.toggle_row("3");
    assert_eq!(selection.snapshot(), before);
}

#[test]
fn test_toggle_all_selects_every_visible_row() {
    let visible = keys(8);
    let mut selection = SelectionTracker::uncontrolled();

    assert!(!selection.is_indeterminate(&visible));
    selection.toggle_all(&visible);

    assert_eq!(selection.len(), 8);
    assert!(selection.is_all_selected(&visible));
    assert!(!selection.is_indeterminate(&visible));
}

#[test]
fn test_toggle_all_overrides_partial_selection() {
    let visible = keys(8);
    let mut selection = SelectionTracker::uncontrolled();
    selection.toggle_row("2");
    selection.toggle_row("5");

    assert!(selection.is_indeterminate(&visible));

    selection.toggle_all(&visible);
    assert!(selection.is_all_selected(&visible));
    assert_eq!(selection.len(), 8);
}

#[test]
fn test_toggle_all_clears_when_everything_selected() {
    let visible = keys(4);
    let mut selection = SelectionTracker::uncontrolled();
    selection.toggle_all(&visible);
    selection.toggle_all(&visible);
    assert!(selection.is_empty());
}

#[test]
fn test_toggle_all_leaves_other_pages_alone() {
    let page_one = keys(3);
    let mut selection = SelectionTracker::uncontrolled();
    selection.toggle_row("99");

    selection.toggle_all(&page_one);
    selection.toggle_all(&page_one);

    assert_eq!(selection.selected_keys(), vec!["99".to_string()]);
}

#[test]
fn test_empty_window() {
    let mut selection = SelectionTracker::uncontrolled();
    assert!(!selection.is_all_selected(&[]));
    assert!(!selection.is_indeterminate(&[]));
    assert!(selection.toggle_all(&[]).is_empty());
}

#[test]
fn test_explicit_false_entries_count_as_unselected() {
    let mut selection = SelectionTracker::uncontrolled();
    let mut map = SelectionMap::new();
    map.insert("1".to_string(), false);
    map.insert("2".to_string(), true);
    selection.replace(map);

    assert!(!selection.is_selected("1"));
    assert_eq!(selection.selected_keys(), vec!["2".to_string()]);
    assert!(selection.is_indeterminate(&keys(2)));
}

#[test]
fn test_observer_sees_every_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut selection =
        SelectionTracker::uncontrolled().with_observer(Arc::new(move |_: &SelectionMap| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    selection.toggle_row("1");
    selection.toggle_all(&keys(3));
    selection.clear();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

// ============================================================================
// Controlled
// ============================================================================

#[test]
fn test_controlled_writes_through_to_caller_state() {
    let state: Shared<SelectionMap> = Shared::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    let mut selection = SelectionTracker::controlled(
        state.clone(),
        Some(Arc::new(move |map: &SelectionMap| {
            log.lock().unwrap().push(map.len());
        })),
    );
    assert!(selection.is_controlled());

    selection.toggle_row("7");

    assert_eq!(state.get().get("7"), Some(&true));
    assert!(state.is_dirty());
    assert_eq!(*seen.lock().unwrap(), vec![1]);
}

#[test]
fn test_controlled_reads_caller_updates() {
    let state: Shared<SelectionMap> = Shared::default();
    let selection = SelectionTracker::controlled(state.clone(), None);

    state.update(|map| {
        map.insert("4".to_string(), true);
    });

    assert!(selection.is_selected("4"));
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_controlled_updates_from_many_trackers_are_not_lost() {
    let state: Shared<SelectionMap> = Shared::default();

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let state = state.clone();
            thread::spawn(move || {
                let mut selection = SelectionTracker::controlled(state, None);
                for row in 0..50 {
                    selection.toggle_row(&format!("{worker}-{row}"));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(state.get().len(), 400);
}

#[test]
fn test_clear_dirty_resets_flag() {
    let state: Shared<SelectionMap> = Shared::default();
    let mut selection = SelectionTracker::controlled(state.clone(), None);
    assert!(!state.is_dirty());

    selection.toggle_row("1");
    assert!(state.is_dirty());

    state.clear_dirty();
    assert!(!state.is_dirty());
    assert_eq!(state.get().len(), 1);
}
