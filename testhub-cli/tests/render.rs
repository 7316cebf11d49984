use serde_json::{Value, json};
use testhub_cli::render::{
    footer_line, grid_table, metrics_table, render_grid, request_table, stats_table, tab_line,
};
use testhub_grid::{Column, DataTable, TableProps};
use testhub_mock::{MockError, NetworkFault, PostStats, RequestLog, ServerMetrics};

fn rows(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({ "id": i.to_string(), "name": format!("user {i}") }))
        .collect()
}

fn table(data: Vec<Value>) -> DataTable<Value> {
    let props = TableProps::new(data, vec![Column::new("name", "Name")])
        .manual_pagination(false)
        .enable_row_selection(true)
        .enable_index_column(true);
    DataTable::new(props).unwrap()
}

// ============================================================================
// Grid
// ============================================================================

#[test]
fn test_loading_grid_shows_only_loading_text() {
    let mut t = table(rows(3));
    t.set_loading(true);

    let text = render_grid(&t.render(), "Loading users...");
    assert!(text.contains("Loading users..."));
    assert!(!text.contains("Name"));
    assert!(!text.contains("Showing"));
}

#[test]
fn test_empty_grid_shows_placeholder() {
    let text = grid_table(&table(Vec::new()).render(), "").to_string();
    assert!(text.contains("Name"));
    assert!(text.contains("No data available"));
}

#[test]
fn test_populated_grid_marks_selection() {
    let mut t = table(rows(3));
    t.toggle_row("2");

    let text = render_grid(&t.render(), "");
    assert!(text.contains("[-]"));
    assert!(text.contains("[x]"));
    assert!(text.contains("user 3"));
    assert!(text.contains("Showing 1-3 of 3 results"));
}

#[test]
fn test_footer_line_marks_current_page() {
    let mut t = table(rows(25));
    t.go_to_page(2);

    let footer = t.render().footer.unwrap();
    assert_eq!(
        footer_line(&footer),
        "Showing 11-20 of 25 results    page 2/3    < 1 [2] 3 >"
    );

    t.go_to_page(3);
    let footer = t.render().footer.unwrap();
    assert!(footer_line(&footer).ends_with("< 1 2 [3] -"));
}

#[test]
fn test_tab_line_brackets_active_tab() {
    let props = TableProps::new(rows(1), vec![Column::new("name", "Name")])
        .tabs(["all", "draft"])
        .active_tab("draft")
        .on_tab_change(|_: &str| {});
    let grid = DataTable::new(props).unwrap().render();

    assert_eq!(tab_line(&grid.tabs.unwrap()), "all | [draft]");
}

// ============================================================================
// Logs
// ============================================================================

#[test]
fn test_request_table_lists_outcomes() {
    let mut log = RequestLog::new();
    log.record::<()>("/api/users", &Ok(()), std::time::Duration::from_millis(120));
    log.record::<()>(
        "/api/posts",
        &Err(MockError::Network(NetworkFault::ProxyError)),
        std::time::Duration::from_millis(80),
    );

    let text = request_table(&log).to_string();
    assert!(text.contains("/api/users"));
    assert!(text.contains("success"));
    assert!(text.contains("120 ms"));
    assert!(text.contains("Proxy Error"));
}

#[test]
fn test_stats_table_lists_every_counter() {
    let stats = PostStats {
        total_posts: 12,
        published_posts: 7,
        draft_posts: 5,
        total_views: 4321,
        total_likes: 99,
        total_comments: 8,
    };
    let text = stats_table(&stats).to_string();
    for label in ["Posts", "Published", "Drafts", "Views", "Likes", "Comments"] {
        assert!(text.contains(label), "missing {label}");
    }
    assert!(text.contains("4321"));
    assert!(text.contains("99"));
}

#[test]
fn test_metrics_table_formats_readings() {
    let metrics = ServerMetrics {
        cpu: 42.25,
        memory: 81.0,
        disk: 5.0,
        network: 66.6,
        active_connections: 734,
        uptime: 3,
        requests_per_second: 120,
        error_rate: 10.0,
    };
    let text = metrics_table(&metrics).to_string();
    assert!(text.contains("42.2%") || text.contains("42.3%"));
    assert!(text.contains("81.0%"));
    assert!(text.contains("734"));
    assert!(text.contains("3 s"));
    assert!(text.contains("Requests/s"));
}
