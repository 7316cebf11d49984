use proptest::prelude::*;
use testhub_grid::{Pager, PaginationMode, SelectionTracker, total_pages};

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("row-{i}")).collect()
}

proptest! {
    #[test]
    fn test_total_pages_is_ceiling(items in 0usize..10_000, size in 1usize..500) {
        let pages = total_pages(items, size);
        prop_assert!(pages * size >= items);
        if items > 0 {
            prop_assert!((pages - 1) * size < items);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn test_page_stays_in_range(
        items in 0usize..500,
        size in 1usize..50,
        requests in proptest::collection::vec(0usize..60, 1..20),
    ) {
        let mut pager = Pager::new(PaginationMode::Automatic, 1, size, items).unwrap();
        for n in requests {
            pager.go_to_page(n);
            prop_assert!(pager.page() >= 1);
            prop_assert!(pager.page() <= pager.total_pages().max(1));
            prop_assert!(pager.visible_range(items).len() <= size);
        }
    }

    #[test]
    fn test_next_then_previous_returns(items in 1usize..500, size in 1usize..50, start in 1usize..60) {
        let mut pager = Pager::new(PaginationMode::Automatic, start, size, items).unwrap();
        let before = pager.page();
        if pager.go_to_next_page().is_some() {
            prop_assert_eq!(pager.go_to_previous_page(), Some(before));
        } else {
            prop_assert!(pager.is_last_page());
        }
    }

    #[test]
    fn test_toggle_row_is_an_involution(
        preset in proptest::collection::vec(0usize..20, 0..10),
        key in 0usize..20,
    ) {
        let mut selection = SelectionTracker::uncontrolled();
        for i in preset {
            if !selection.is_selected(&format!("row-{i}")) {
                selection.toggle_row(&format!("row-{i}"));
            }
        }
        let before = selection.snapshot();
        let key = format!("row-{key}");
        selection.toggle_row(&key);
        selection.toggle_row(&key);
        prop_assert_eq!(selection.snapshot(), before);
    }

    #[test]
    fn test_toggle_all_settles_on_all_or_none(
        n in 1usize..30,
        preset in proptest::collection::vec(0usize..30, 0..30),
    ) {
        let visible = keys(n);
        let mut selection = SelectionTracker::uncontrolled();
        for i in preset.into_iter().filter(|&i| i < n) {
            if !selection.is_selected(&visible[i]) {
                selection.toggle_row(&visible[i]);
            }
        }
        let was_all = selection.is_all_selected(&visible);

        selection.toggle_all(&visible);
        if was_all {
            prop_assert!(visible.iter().all(|k| !selection.is_selected(k)));
        } else {
            prop_assert!(selection.is_all_selected(&visible));
        }
        prop_assert!(!selection.is_indeterminate(&visible));
    }
}
