use testhub_grid::{GridError, Pager, PaginationMode, total_pages};

fn auto(page: usize, size: usize, total: usize) -> Pager {
    Pager::new(PaginationMode::Automatic, page, size, total).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_rejects_zero_page_size() {
    let err = Pager::new(PaginationMode::Manual, 1, 0, 10).unwrap_err();
    assert_eq!(err, GridError::InvalidPageSize(0));
}

#[test]
fn test_rejects_zero_page() {
    let err = Pager::new(PaginationMode::Manual, 0, 10, 10).unwrap_err();
    assert_eq!(err, GridError::InvalidPage(0));
}

#[test]
fn test_initial_page_past_end_is_clamped() {
    let pager = auto(9, 10, 25);
    assert_eq!(pager.page(), 3);
}

#[test]
fn test_total_pages_rounds_up() {
    assert_eq!(total_pages(25, 10), 3);
    assert_eq!(total_pages(30, 10), 3);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(10, 0), 0);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_go_to_page_clamps_high_request() {
    let mut pager = auto(1, 10, 25);
    assert_eq!(pager.total_pages(), 3);
    assert_eq!(pager.go_to_page(5), Some(3));
    assert_eq!(pager.page(), 3);
}

#[test]
fn test_go_to_page_clamps_zero() {
    let mut pager = auto(2, 10, 25);
    assert_eq!(pager.go_to_page(0), Some(1));
}

#[test]
fn test_go_to_page_reports_only_moves() {
    let mut pager = auto(1, 10, 25);
    assert_eq!(pager.go_to_page(1), None);
    assert_eq!(pager.go_to_page(0), None);
    assert_eq!(pager.go_to_page(3), Some(3));
    assert_eq!(pager.go_to_page(9), None);
    assert_eq!(pager.page(), 3);
}

#[test]
fn test_next_and_previous_are_noops_at_boundaries() {
    let mut pager = auto(1, 10, 25);
    assert!(pager.is_first_page());
    assert_eq!(pager.go_to_previous_page(), None);
    assert_eq!(pager.page(), 1);

    assert_eq!(pager.go_to_next_page(), Some(2));
    assert_eq!(pager.go_to_next_page(), Some(3));
    assert!(pager.is_last_page());
    assert_eq!(pager.go_to_next_page(), None);
    assert_eq!(pager.page(), 3);
}

#[test]
fn test_no_items_means_no_pages() {
    let mut pager = auto(1, 10, 0);
    assert_eq!(pager.total_pages(), 0);
    assert!(pager.is_first_page());
    assert!(pager.is_last_page());
    assert_eq!(pager.go_to_next_page(), None);
    assert_eq!(pager.go_to_previous_page(), None);
    assert_eq!(pager.go_to_page(2), None);
    assert_eq!(pager.visible_range(0), 0..0);
    assert!(pager.page_window().is_empty());
}

#[test]
fn test_shrinking_totals_pulls_page_back() {
    let mut pager = auto(3, 10, 25);
    pager.set_total_items(12);
    assert_eq!(pager.page(), 2);
}

// ============================================================================
// Visible window
// ============================================================================

#[test]
fn test_automatic_mode_slices_data() {
    let data: Vec<u32> = (1..=25).collect();
    let mut pager = auto(1, 10, data.len());

    assert_eq!(pager.visible(&data), &data[0..10]);
    pager.go_to_page(3);
    assert_eq!(pager.visible(&data), &[21, 22, 23, 24, 25]);
}

#[test]
fn test_manual_mode_shows_supplied_slice() {
    let page_two: Vec<u32> = (11..=20).collect();
    let pager = Pager::new(PaginationMode::Manual, 2, 10, 25).unwrap();

    assert_eq!(pager.visible(&page_two), page_two.as_slice());
    assert_eq!(pager.row_offset(), 10);
}

#[test]
fn test_item_range() {
    let mut pager = auto(1, 10, 25);
    assert_eq!(pager.item_range(10), (1, 10));
    pager.go_to_page(3);
    assert_eq!(pager.item_range(5), (21, 25));
    assert_eq!(pager.item_range(0), (0, 0));
}

#[test]
fn test_page_window() {
    let mut pager = auto(1, 10, 100);
    assert_eq!(pager.page_window(), vec![1, 2, 3]);

    pager.go_to_page(5);
    assert_eq!(pager.page_window(), vec![3, 4, 5, 6, 7]);

    pager.go_to_page(10);
    assert_eq!(pager.page_window(), vec![8, 9, 10]);
}
