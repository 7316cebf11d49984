//! Draws grids and simulator logs with comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use testhub_grid::{Alignment, Footer, Grid, GridCell, RenderState, TabBar};
use testhub_mock::{
    MetricLevel, PostStats, RequestLog, RequestOutcome, ServerLogEntry, ServerMetrics, StatusClass,
};

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn alignment(align: Alignment) -> CellAlignment {
    match align {
        Alignment::Left => CellAlignment::Left,
        Alignment::Center => CellAlignment::Center,
        Alignment::Right => CellAlignment::Right,
    }
}

fn grid_cell(cell: &GridCell, selected: bool) -> Cell {
    let out = Cell::new(&cell.text).set_alignment(alignment(cell.align));
    if selected {
        out.fg(Color::Green)
    } else {
        out
    }
}

/// Constraint widths count the one-space padding on each side.
fn apply_widths(table: &mut Table, header: &[GridCell]) {
    for (i, cell) in header.iter().enumerate() {
        if let (Some(width), Some(column)) = (cell.width, table.column_mut(i)) {
            let width = Width::Fixed(width.saturating_add(2));
            column.set_constraint(ColumnConstraint::UpperBoundary(width));
        }
    }
}

/// Table for a projected grid. A loading grid is a single cell holding
/// `loading`.
pub fn grid_table(grid: &Grid, loading: &str) -> Table {
    let mut table = styled_table();

    match &grid.state {
        RenderState::Loading => {
            table.add_row(vec![Cell::new(loading).add_attribute(Attribute::Italic)]);
        }
        RenderState::Empty {
            header,
            placeholder,
        } => {
            table.set_header(header.iter().map(|c| header_cell(&c.text)));
            let mut row = vec![Cell::new(&placeholder.text).fg(Color::DarkGrey)];
            row.extend((1..placeholder.col_span).map(|_| Cell::new("")));
            table.add_row(row);
            apply_widths(&mut table, header);
        }
        RenderState::Populated { header, rows } => {
            table.set_header(header.iter().map(|c| header_cell(&c.text)));
            for row in rows {
                table.add_row(row.cells.iter().map(|c| grid_cell(c, row.selected)));
            }
            apply_widths(&mut table, header);
        }
    }
    table
}

/// "all | [published] | draft".
pub fn tab_line(tabs: &TabBar) -> String {
    tabs.tabs
        .iter()
        .map(|tab| {
            if *tab == tabs.active {
                format!("[{}]", tab)
            } else {
                tab.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Summary, then the page controls: `< 1 [2] 3 >`, with `-` for a disabled
/// arrow.
pub fn footer_line(footer: &Footer) -> String {
    let mut controls = vec![if footer.prev_enabled { "<" } else { "-" }.to_string()];
    controls.extend(footer.page_window.iter().map(|&page| {
        if page == footer.current_page {
            format!("[{}]", page)
        } else {
            page.to_string()
        }
    }));
    controls.push(if footer.next_enabled { ">" } else { "-" }.to_string());

    format!(
        "{}    page {}/{}    {}",
        footer.summary(),
        footer.current_page,
        footer.total_pages,
        controls.join(" ")
    )
}

/// The whole grid as text: tabs, table and footer.
pub fn render_grid(grid: &Grid, loading: &str) -> String {
    let mut out = String::new();
    if let Some(tabs) = &grid.tabs {
        out.push_str(&tab_line(tabs));
        out.push('\n');
    }
    out.push_str(&grid_table(grid, loading).to_string());
    if let Some(footer) = &grid.footer {
        out.push('\n');
        out.push_str(&footer_line(footer));
    }
    out
}

fn millis(duration: std::time::Duration) -> Cell {
    Cell::new(format!("{} ms", duration.as_millis())).set_alignment(CellAlignment::Right)
}

/// Simulated network requests, oldest first.
pub fn request_table(log: &RequestLog) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Endpoint"),
        header_cell("Status"),
        header_cell("Duration"),
        header_cell("Detail"),
    ]);
    for entry in log.entries() {
        let (status, detail) = match &entry.outcome {
            RequestOutcome::Success => (Cell::new("success").fg(Color::Green), String::new()),
            RequestOutcome::Error(message) => (Cell::new("error").fg(Color::Red), message.clone()),
        };
        table.add_row(vec![
            Cell::new(&entry.endpoint),
            status,
            millis(entry.duration),
            Cell::new(detail),
        ]);
    }
    table
}

/// Server answers, newest first.
pub fn server_table(entries: &[ServerLogEntry]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Time"),
        header_cell("Endpoint"),
        header_cell("Status"),
        header_cell("Description"),
        header_cell("Duration"),
    ]);
    for entry in entries {
        let color = match entry.status.class {
            StatusClass::Success => Color::Green,
            StatusClass::Client => Color::Yellow,
            StatusClass::Server => Color::Red,
        };
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%H:%M:%S%.3f")),
            Cell::new(&entry.endpoint),
            Cell::new(format!("{} {}", entry.status.code, entry.status.message)).fg(color),
            Cell::new(entry.status.description),
            millis(entry.duration),
        ]);
    }
    table
}

/// Post counters, one per row.
pub fn stats_table(stats: &PostStats) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    let rows: [(&str, u64); 6] = [
        ("Posts", stats.total_posts as u64),
        ("Published", stats.published_posts as u64),
        ("Drafts", stats.draft_posts as u64),
        ("Views", stats.total_views),
        ("Likes", stats.total_likes),
        ("Comments", stats.total_comments),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), count(value)]);
    }
    table
}

fn percent(value: f64) -> Cell {
    let color = match MetricLevel::of(value) {
        MetricLevel::Normal => Color::Green,
        MetricLevel::Elevated => Color::Yellow,
        MetricLevel::Critical => Color::Red,
    };
    Cell::new(format!("{:.1}%", value))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

fn count(value: impl std::fmt::Display) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// Resource readings from the simulated server.
pub fn metrics_table(metrics: &ServerMetrics) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    table
        .add_row(vec![Cell::new("CPU"), percent(metrics.cpu)])
        .add_row(vec![Cell::new("Memory"), percent(metrics.memory)])
        .add_row(vec![Cell::new("Disk"), percent(metrics.disk)])
        .add_row(vec![Cell::new("Network"), percent(metrics.network)])
        .add_row(vec![Cell::new("Error rate"), percent(metrics.error_rate)])
        .add_row(vec![
            Cell::new("Active connections"),
            count(metrics.active_connections),
        ])
        .add_row(vec![
            Cell::new("Requests/s"),
            count(metrics.requests_per_second),
        ])
        .add_row(vec![Cell::new("Uptime"), count(format!("{} s", metrics.uptime))]);
    table
}
