use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use testhub_grid::{
    CellKind, CellValue, Column, DataTable, EMPTY_PLACEHOLDER, GridError, RenderState,
    SelectAllScope, SelectionMap, Shared, TableProps,
};

fn users(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "name": format!("User {i}"),
                "email": format!("user{i}@example.com"),
                "role": if i % 2 == 0 { "admin" } else { "user" },
            })
        })
        .collect()
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email").width(28),
    ]
}

fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (Arc::clone(&log), log)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_zero_page_size_is_rejected() {
    let props = TableProps::new(users(3), columns()).docs_per_page(0);
    assert_eq!(
        DataTable::new(props).unwrap_err(),
        GridError::InvalidPageSize(0)
    );
}

#[test]
fn test_zero_page_is_rejected() {
    let props = TableProps::new(users(3), columns()).page(0);
    assert_eq!(DataTable::new(props).unwrap_err(), GridError::InvalidPage(0));
}

#[test]
fn test_manual_totals_come_from_caller() {
    let props = TableProps::new(users(10), columns())
        .page(2)
        .total_docs(25);
    let table = DataTable::new(props).unwrap();

    let info = table.pagination();
    assert_eq!(info.total_items, 25);
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.current_page, 2);
    assert_eq!(table.visible_rows().len(), 10);
}

#[test]
fn test_manual_total_page_without_total_docs() {
    let props = TableProps::new(users(10), columns())
        .page(4)
        .total_page(7);
    let table = DataTable::new(props).unwrap();
    assert_eq!(table.pagination().total_pages, 7);
    assert_eq!(table.pagination().current_page, 4);
}

// ============================================================================
// Render states
// ============================================================================

#[test]
fn test_empty_data_renders_single_placeholder_row() {
    let props = TableProps::new(Vec::<Value>::new(), columns()).enable_row_selection(true);
    let grid = DataTable::new(props).unwrap().render();

    assert!(grid.is_empty());
    assert_eq!(grid.body_row_count(), 1);
    assert!(grid.footer.is_none());
    match &grid.state {
        RenderState::Empty {
            header,
            placeholder,
        } => {
            assert_eq!(header.len(), 3);
            assert_eq!(placeholder.text, EMPTY_PLACEHOLDER);
            assert_eq!(placeholder.col_span, 3);
        }
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn test_loading_suppresses_everything() {
    let props = TableProps::new(users(5), columns())
        .is_loading(true)
        .tabs(["All", "Admins"])
        .active_tab("All")
        .on_tab_change(|_| {});
    let mut table = DataTable::new(props).unwrap();

    let grid = table.render();
    assert!(grid.is_loading());
    assert!(grid.header().is_empty());
    assert!(grid.tabs.is_none());
    assert!(grid.footer.is_none());

    table.set_loading(false);
    let grid = table.render();
    assert_eq!(grid.rows().len(), 5);
    assert!(grid.tabs.is_some());
}

#[test]
fn test_populated_grid_cells() {
    let props = TableProps::new(users(3), columns());
    let grid = DataTable::new(props).unwrap().render();

    let header: Vec<_> = grid.header().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(header, vec!["Name", "Email"]);

    let first = &grid.rows()[0];
    assert_eq!(first.key, "1");
    assert_eq!(first.cells[0].text, "User 1");
    assert_eq!(first.cells[1].text, "user1@example.com");
    assert_eq!(first.cells[1].width, Some(28));
}

#[test]
fn test_leading_columns_order() {
    let props = TableProps::new(users(2), columns())
        .enable_row_selection(true)
        .enable_index_column(true);
    let grid = DataTable::new(props).unwrap().render();

    let ids: Vec<_> = grid.header().iter().map(|c| c.column_id.as_str()).collect();
    assert_eq!(ids, vec!["select", "index", "name", "email"]);

    let row = &grid.rows()[1];
    assert_eq!(
        row.cells[0].kind,
        CellKind::Checkbox {
            checked: false,
            indeterminate: false
        }
    );
    assert_eq!(row.cells[1].kind, CellKind::Index(2));
    assert_eq!(row.cells[1].text, "2");
}

#[test]
fn test_disable_default_row_selection_hides_checkboxes() {
    let props = TableProps::new(users(2), columns())
        .enable_row_selection(true)
        .disable_default_row_selection(true);
    let mut table = DataTable::new(props).unwrap();

    table.toggle_row("1");
    let grid = table.render();

    assert_eq!(grid.header().len(), 2);
    assert!(grid.rows()[0].selected);
}

#[test]
fn test_custom_renderers() {
    let columns = vec![
        Column::new("role", "Role").render(|value, _row: &Value| value.to_string().to_uppercase()),
        Column::new("initial", "Initial").accessor_fn(|row: &Value| {
            row["name"]
                .as_str()
                .and_then(|name| name.chars().next())
                .map(|c| CellValue::Text(c.to_string()))
                .unwrap_or_default()
        }),
        Column::new("page", "?").header_fn(|cx| format!("Page {}/{}", cx.page, cx.total_pages)),
    ];
    let props = TableProps::new(users(2), columns);
    let grid = DataTable::new(props).unwrap().render();

    assert_eq!(grid.header()[2].text, "Page 1/1");
    assert_eq!(grid.rows()[1].cells[0].text, "ADMIN");
    assert_eq!(grid.rows()[1].cells[1].text, "U");
    assert_eq!(grid.rows()[1].cells[2].text, "");
}

#[test]
fn test_footer() {
    let props = TableProps::new(users(25), columns()).manual_pagination(false);
    let mut table = DataTable::new(props).unwrap();
    table.go_to_page(3);

    let footer = table.render().footer.unwrap();
    assert_eq!(footer.summary(), "Showing 21-25 of 25 results");
    assert_eq!(footer.page_window, vec![1, 2, 3]);
    assert!(footer.prev_enabled);
    assert!(!footer.next_enabled);
}

#[test]
fn test_disable_footer() {
    let props = TableProps::new(users(5), columns()).disable_footer(true);
    assert!(DataTable::new(props).unwrap().render().footer.is_none());
}

// ============================================================================
// Pagination events
// ============================================================================

#[test]
fn test_page_change_callback() {
    let (pages, log) = recorder();
    let props = TableProps::new(users(25), columns())
        .manual_pagination(false)
        .on_page_change(move |page| log.lock().unwrap().push(page));
    let mut table = DataTable::new(props).unwrap();

    assert_eq!(table.go_to_previous_page(), None);
    assert_eq!(table.go_to_next_page(), Some(2));
    assert_eq!(table.go_to_page(5), Some(3));
    assert_eq!(table.go_to_next_page(), None);
    assert_eq!(table.go_to_previous_page(), Some(2));

    assert_eq!(*pages.lock().unwrap(), vec![2, 3, 2]);
}

#[test]
fn test_page_change_skips_unmoved_pages() {
    let (pages, log) = recorder();
    let props = TableProps::new(users(25), columns())
        .manual_pagination(false)
        .on_page_change(move |page| log.lock().unwrap().push(page));
    let mut table = DataTable::new(props).unwrap();

    assert_eq!(table.go_to_page(1), None);
    assert_eq!(table.go_to_page(5), Some(3));
    assert_eq!(table.go_to_page(9), None);
    assert_eq!(table.go_to_page(3), None);
    assert_eq!(table.pagination().current_page, 3);

    assert_eq!(*pages.lock().unwrap(), vec![3]);
}

#[test]
fn test_automatic_pages_show_different_rows() {
    let props = TableProps::new(users(25), columns()).manual_pagination(false);
    let mut table = DataTable::new(props).unwrap();

    table.go_to_next_page();
    let grid = table.render();
    assert_eq!(grid.rows().len(), 10);
    assert_eq!(grid.rows()[0].key, "11");
}

#[test]
fn test_manual_page_arrives_from_caller() {
    let (pages, log) = recorder();
    let props = TableProps::new(users(10), columns())
        .total_docs(25)
        .on_page_change(move |page| log.lock().unwrap().push(page));
    let mut table = DataTable::new(props).unwrap();

    table.go_to_next_page();
    let next: Vec<Value> = users(20).into_iter().skip(10).collect();
    table.set_page_data(next, 2, 25);

    let grid = table.render();
    assert_eq!(grid.rows()[0].key, "11");
    assert_eq!(*pages.lock().unwrap(), vec![2]);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_toggle_all_selects_all_eight() {
    let props = TableProps::new(users(8), columns()).enable_row_selection(true);
    let mut table = DataTable::new(props).unwrap();

    assert!(!table.is_indeterminate());
    let map = table.toggle_all();

    assert_eq!(map.values().filter(|&&v| v).count(), 8);
    assert!(table.is_all_selected());
    assert!(!table.is_indeterminate());
}

#[test]
fn test_partial_selection_then_toggle_all() {
    let props = TableProps::new(users(8), columns()).enable_row_selection(true);
    let mut table = DataTable::new(props).unwrap();

    table.toggle_row("2");
    table.toggle_row("5");
    assert!(table.is_indeterminate());

    let header = table.render().header()[0].clone();
    assert_eq!(
        header.kind,
        CellKind::Checkbox {
            checked: false,
            indeterminate: true
        }
    );
    assert_eq!(header.text, "[-]");

    table.toggle_all();
    assert!(table.is_all_selected());
    assert_eq!(table.selected_rows().len(), 8);
}

#[test]
fn test_selection_disabled_ignores_toggles() {
    let props = TableProps::new(users(3), columns());
    let mut table = DataTable::new(props).unwrap();

    table.toggle_row("1");
    table.toggle_all();
    assert!(table.selection().is_empty());
}

#[test]
fn test_select_all_is_page_scoped_by_default() {
    let props = TableProps::new(users(25), columns())
        .manual_pagination(false)
        .enable_row_selection(true);
    let mut table = DataTable::new(props).unwrap();

    table.toggle_all();
    assert_eq!(table.selection().len(), 10);

    table.go_to_next_page();
    assert!(!table.is_all_selected());
    assert!(!table.is_indeterminate());
}

#[test]
fn test_select_all_pages_scope() {
    let props = TableProps::new(users(25), columns())
        .manual_pagination(false)
        .enable_row_selection(true)
        .select_all_scope(SelectAllScope::AllPages);
    let mut table = DataTable::new(props).unwrap();

    table.toggle_all();
    assert_eq!(table.selection().len(), 25);
}

#[test]
fn test_rows_without_id_are_keyed_by_position() {
    let data: Vec<Value> = (0..15).map(|i| json!({ "name": format!("n{i}") })).collect();
    let props = TableProps::new(data, columns())
        .manual_pagination(false)
        .enable_row_selection(true);
    let mut table = DataTable::new(props).unwrap();

    table.go_to_next_page();
    table.toggle_row_at(0);

    assert_eq!(table.selected_rows().len(), 1);
    assert_eq!(table.selected_rows()[0]["name"], "n10");
    assert!(table.selection().contains_key("10"));
    assert_eq!(table.toggle_row_at(99), None);
}

#[test]
fn test_controlled_selection_through_props() {
    let state: Shared<SelectionMap> = Shared::default();
    let (changes, log) = recorder();
    let props = TableProps::new(users(4), columns())
        .enable_row_selection(true)
        .selected_row(state.clone())
        .on_row_selection(move |map| log.lock().unwrap().push(map.len()));
    let mut table = DataTable::new(props).unwrap();

    table.toggle_row("3");
    assert_eq!(state.get().get("3"), Some(&true));

    state.update(|map| {
        map.insert("1".to_string(), true);
    });
    assert!(table.render().rows()[0].selected);

    table.toggle_all();
    assert_eq!(state.get().len(), 4);
    assert_eq!(*changes.lock().unwrap(), vec![1, 4]);
}

#[test]
fn test_uncontrolled_selection_reports_changes() {
    let (changes, log) = recorder();
    let props = TableProps::new(users(4), columns())
        .enable_row_selection(true)
        .on_row_selection(move |map: &SelectionMap| log.lock().unwrap().push(map.clone()));
    let mut table = DataTable::new(props).unwrap();

    table.toggle_row("2");

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].get("2"), Some(&true));
}

// ============================================================================
// Row and tab events
// ============================================================================

#[test]
fn test_click_fires_row_click_then_select() {
    let (events, log) = recorder();
    let select_log = Arc::clone(&log);
    let props = TableProps::new(users(3), columns())
        .on_row_click(move |row: &Value| {
            log.lock()
                .unwrap()
                .push(format!("click {}", row["id"].as_str().unwrap_or_default()))
        })
        .on_select(move |row: &Value| {
            select_log
                .lock()
                .unwrap()
                .push(format!("select {}", row["id"].as_str().unwrap_or_default()))
        });
    let table = DataTable::new(props).unwrap();

    assert!(table.click_row(1));
    assert!(!table.click_row(10));
    assert_eq!(*events.lock().unwrap(), vec!["click 2", "select 2"]);
}

#[test]
fn test_double_click() {
    let (events, log) = recorder();
    let props = TableProps::new(users(3), columns())
        .on_row_double_click(move |row: &Value| log.lock().unwrap().push(row["id"].clone()));
    let table = DataTable::new(props).unwrap();

    assert!(table.double_click_row(2));
    assert_eq!(*events.lock().unwrap(), vec![json!("3")]);
}

#[test]
fn test_tabs() {
    let (events, log) = recorder();
    let props = TableProps::new(users(3), columns())
        .tabs(["All", "Admins"])
        .active_tab("All")
        .on_tab_change(move |tab| log.lock().unwrap().push(tab.to_string()));
    let mut table = DataTable::new(props).unwrap();

    assert!(!table.select_tab("Guests"));
    assert!(table.select_tab("Admins"));
    assert_eq!(table.active_tab(), Some("Admins"));

    let tabs = table.render().tabs.unwrap();
    assert_eq!(tabs.active, "Admins");
    assert_eq!(*events.lock().unwrap(), vec!["Admins".to_string()]);
}

#[test]
fn test_tabs_need_a_handler() {
    let props = TableProps::new(users(3), columns())
        .tabs(["All"])
        .active_tab("All");
    let mut table = DataTable::new(props).unwrap();

    assert!(table.render().tabs.is_none());
    assert!(!table.select_tab("All"));
}

// ============================================================================
// Caller-driven updates
// ============================================================================

#[test]
fn test_set_total_docs_recomputes_pages() {
    let props = TableProps::new(users(10), columns()).total_docs(25);
    let mut table = DataTable::new(props).unwrap();
    assert_eq!(table.pagination().total_pages, 3);

    table.set_total_docs(Some(40));
    assert_eq!(table.pagination().total_pages, 4);

    table.set_total_docs(None);
    assert_eq!(table.pagination().total_items, 10);
    assert_eq!(table.pagination().total_pages, 1);
}

#[test]
fn test_set_columns_replaces_header() {
    let mut table = DataTable::new(TableProps::new(users(2), columns())).unwrap();
    table.set_columns(vec![Column::new("role", "Role")]);

    let grid = table.render();
    let headers: Vec<_> = grid.header().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(headers, vec!["Role"]);
    assert_eq!(grid.rows()[1].cells[0].text, "admin");
}

#[test]
fn test_clear_selection_empties_map_and_notifies() {
    let (changes, log) = recorder();
    let props = TableProps::new(users(5), columns())
        .enable_row_selection(true)
        .on_row_selection(move |map: &SelectionMap| log.lock().unwrap().push(map.len()));
    let mut table = DataTable::new(props).unwrap();

    table.toggle_all();
    assert!(table.is_all_selected());

    assert!(table.clear_selection().is_empty());
    assert!(table.selected_rows().is_empty());
    assert_eq!(*changes.lock().unwrap(), vec![5, 0]);
}
