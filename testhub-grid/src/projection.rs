//! Render projection: turns the visible rows, the column definitions and the
//! selection into a renderable grid.
//!
//! The projection is plain data. Front ends (the terminal hub, a test) walk a
//! [`Grid`] and draw it however they like.

use crate::column::{Alignment, Column, HeaderContext};
use crate::pagination::Pager;
use crate::row::{Row, RowKey};
use crate::selection::SelectionTracker;

/// Id of the leading checkbox column.
pub const SELECT_COLUMN_ID: &str = "select";

/// Id of the leading row-number column.
pub const INDEX_COLUMN_ID: &str = "index";

/// Header of the row-number column.
pub const INDEX_COLUMN_HEADER: &str = "#";

/// Width of the checkbox column.
pub const SELECT_COLUMN_WIDTH: u16 = 3;

/// Placeholder text for an empty table.
pub const EMPTY_PLACEHOLDER: &str = "No data available";

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// A checkbox. Header checkboxes may be indeterminate.
    Checkbox { checked: bool, indeterminate: bool },
    /// 1-based row number on the current page.
    Index(usize),
    /// Column data.
    Data,
}

impl CellKind {
    /// Checkbox glyph, or `None` for non-checkbox cells.
    pub fn checkbox_glyph(&self) -> Option<&'static str> {
        match self {
            Self::Checkbox { checked: true, .. } => Some("[x]"),
            Self::Checkbox {
                indeterminate: true,
                ..
            } => Some("[-]"),
            Self::Checkbox { .. } => Some("[ ]"),
            _ => None,
        }
    }
}

/// A header or body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Column id.
    pub column_id: String,
    /// Cell kind.
    pub kind: CellKind,
    /// Display text.
    pub text: String,
    /// Fixed width, if the column has one.
    pub width: Option<u16>,
    /// Alignment.
    pub align: Alignment,
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Selection key.
    pub key: RowKey,
    /// Position within the visible window.
    pub index: usize,
    /// Whether the row is selected.
    pub selected: bool,
    /// Cells in column order.
    pub cells: Vec<GridCell>,
}

/// Placeholder shown instead of rows when there is no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Placeholder text.
    pub text: String,
    /// Number of columns the placeholder spans.
    pub col_span: usize,
}

/// The body of the grid. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// An external load is in progress. Nothing else is drawn, tabs included.
    Loading,
    /// No rows: header plus a single placeholder row.
    Empty {
        header: Vec<GridCell>,
        placeholder: Placeholder,
    },
    /// Header plus one row per visible record.
    Populated {
        header: Vec<GridCell>,
        rows: Vec<GridRow>,
    },
}

/// Pagination footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// First item number shown (1-based).
    pub start_item: usize,
    /// Last item number shown.
    pub end_item: usize,
    /// Total items.
    pub total: usize,
    /// Current page.
    pub current_page: usize,
    /// Total pages.
    pub total_pages: usize,
    /// Page numbers offered as direct jumps.
    pub page_window: Vec<usize>,
    /// The previous-page control is enabled.
    pub prev_enabled: bool,
    /// The next-page control is enabled.
    pub next_enabled: bool,
}

impl Footer {
    /// "Showing 1-10 of 25 results".
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {} results",
            self.start_item, self.end_item, self.total
        )
    }
}

/// Tab strip above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar {
    /// Tab labels in order.
    pub tabs: Vec<String>,
    /// The active tab.
    pub active: String,
}

/// A fully projected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Body state.
    pub state: RenderState,
    /// Tab strip, when tabs are configured.
    pub tabs: Option<TabBar>,
    /// Pagination footer, when enabled and there are rows.
    pub footer: Option<Footer>,
}

impl Grid {
    /// Check if the grid is in the loading state.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, RenderState::Loading)
    }

    /// Check if the grid shows the empty placeholder.
    pub fn is_empty(&self) -> bool {
        matches!(self.state, RenderState::Empty { .. })
    }

    /// Header cells (empty while loading).
    pub fn header(&self) -> &[GridCell] {
        match &self.state {
            RenderState::Loading => &[],
            RenderState::Empty { header, .. } | RenderState::Populated { header, .. } => header,
        }
    }

    /// Data rows (empty unless populated).
    pub fn rows(&self) -> &[GridRow] {
        match &self.state {
            RenderState::Populated { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Number of rows drawn in the body, counting the placeholder row.
    pub fn body_row_count(&self) -> usize {
        match &self.state {
            RenderState::Loading => 0,
            RenderState::Empty { .. } => 1,
            RenderState::Populated { rows, .. } => rows.len(),
        }
    }
}

/// Leading columns inserted before the declared ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LeadingColumns {
    pub selection: bool,
    pub index: bool,
}

impl LeadingColumns {
    fn count(self) -> usize {
        usize::from(self.selection) + usize::from(self.index)
    }
}

/// Everything the projection reads.
pub(crate) struct Projection<'a, R> {
    pub columns: &'a [Column<R>],
    pub visible: &'a [R],
    pub visible_keys: &'a [RowKey],
    pub scope_keys: &'a [RowKey],
    pub selection: &'a SelectionTracker,
    pub pager: &'a Pager,
    pub leading: LeadingColumns,
    pub is_loading: bool,
    pub show_footer: bool,
    pub tabs: Option<TabBar>,
}

impl<R: Row> Projection<'_, R> {
    pub(crate) fn project(self) -> Grid {
        if self.is_loading {
            return Grid {
                state: RenderState::Loading,
                tabs: None,
                footer: None,
            };
        }

        let header = self.header();

        if self.visible.is_empty() {
            let col_span = self.leading.count() + self.columns.len();
            return Grid {
                state: RenderState::Empty {
                    header,
                    placeholder: Placeholder {
                        text: EMPTY_PLACEHOLDER.to_string(),
                        col_span,
                    },
                },
                tabs: self.tabs,
                footer: None,
            };
        }

        let rows = self
            .visible
            .iter()
            .zip(self.visible_keys)
            .enumerate()
            .map(|(index, (row, key))| self.row(index, key, row))
            .collect();

        let footer = self.show_footer.then(|| self.footer());

        Grid {
            state: RenderState::Populated { header, rows },
            tabs: self.tabs,
            footer,
        }
    }

    fn header(&self) -> Vec<GridCell> {
        let all_selected = self.selection.is_all_selected(self.scope_keys);
        let indeterminate = self.selection.is_indeterminate(self.scope_keys);
        let cx = HeaderContext {
            all_selected,
            indeterminate,
            page: self.pager.page(),
            total_pages: self.pager.total_pages(),
        };

        let mut cells = Vec::with_capacity(self.leading.count() + self.columns.len());
        if self.leading.selection {
            let kind = CellKind::Checkbox {
                checked: all_selected,
                indeterminate,
            };
            cells.push(GridCell {
                column_id: SELECT_COLUMN_ID.to_string(),
                text: kind.checkbox_glyph().unwrap_or_default().to_string(),
                kind,
                width: Some(SELECT_COLUMN_WIDTH),
                align: Alignment::Center,
            });
        }
        if self.leading.index {
            cells.push(GridCell {
                column_id: INDEX_COLUMN_ID.to_string(),
                kind: CellKind::Data,
                text: INDEX_COLUMN_HEADER.to_string(),
                width: None,
                align: Alignment::Right,
            });
        }
        cells.extend(self.columns.iter().map(|column| GridCell {
            column_id: column.id.clone(),
            kind: CellKind::Data,
            text: column.header_text(&cx),
            width: column.width,
            align: column.align,
        }));
        cells
    }

    fn row(&self, index: usize, key: &RowKey, row: &R) -> GridRow {
        let selected = self.selection.is_selected(key);

        let mut cells = Vec::with_capacity(self.leading.count() + self.columns.len());
        if self.leading.selection {
            let kind = CellKind::Checkbox {
                checked: selected,
                indeterminate: false,
            };
            cells.push(GridCell {
                column_id: SELECT_COLUMN_ID.to_string(),
                text: kind.checkbox_glyph().unwrap_or_default().to_string(),
                kind,
                width: Some(SELECT_COLUMN_WIDTH),
                align: Alignment::Center,
            });
        }
        if self.leading.index {
            let number = index + 1;
            cells.push(GridCell {
                column_id: INDEX_COLUMN_ID.to_string(),
                kind: CellKind::Index(number),
                text: number.to_string(),
                width: None,
                align: Alignment::Right,
            });
        }
        cells.extend(self.columns.iter().map(|column| GridCell {
            column_id: column.id.clone(),
            kind: CellKind::Data,
            text: column.display(row),
            width: column.width,
            align: column.align,
        }));

        GridRow {
            key: key.clone(),
            index,
            selected,
            cells,
        }
    }

    fn footer(&self) -> Footer {
        let (start_item, end_item) = self.pager.item_range(self.visible.len());
        Footer {
            start_item,
            end_item,
            total: self.pager.total_items(),
            current_page: self.pager.page(),
            total_pages: self.pager.total_pages(),
            page_window: self.pager.page_window(),
            prev_enabled: !self.pager.is_first_page(),
            next_enabled: !self.pager.is_last_page(),
        }
    }
}
