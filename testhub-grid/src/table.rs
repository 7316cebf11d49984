//! Data table - a paginated, selectable grid over rows of records.
//!
//! [`TableProps`] mirrors the knobs a caller has on the table (data, columns,
//! paging totals, feature flags and callbacks). [`DataTable`] owns the
//! transient state built from them: the pager and the selection tracker.
//! Interaction methods mutate that state synchronously and fire callbacks;
//! [`DataTable::render`] projects everything into a [`Grid`].

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::column::Column;
use crate::error::GridError;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageInfo, Pager, PaginationMode};
use crate::projection::{Grid, LeadingColumns, Projection, TabBar};
use crate::row::{Row, RowKey, key_or_index};
use crate::selection::{
    SelectAllScope, SelectionHandler, SelectionMap, SelectionTracker,
};
use crate::state::Shared;

/// Called with the requested page.
pub type PageHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Called with a row.
pub type RowHandler<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// Called with a tab label.
pub type TabHandler = Arc<dyn Fn(&str) + Send + Sync>;

// =============================================================================
// TableProps
// =============================================================================

/// Table configuration.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use testhub_grid::{Column, DataTable, TableProps};
///
/// let data = (1..=25)
///     .map(|i| json!({ "id": i, "name": format!("user {i}") }))
///     .collect::<Vec<_>>();
///
/// let props = TableProps::new(data, vec![Column::new("name", "Name")])
///     .manual_pagination(false)
///     .enable_row_selection(true)
///     .on_page_change(|page| println!("page {page}"));
///
/// let mut table = DataTable::new(props).unwrap();
/// assert_eq!(table.pagination().total_pages, 3);
///
/// table.go_to_page(5);
/// assert_eq!(table.pagination().current_page, 3);
/// ```
pub struct TableProps<R> {
    data: Vec<R>,
    columns: Vec<Column<R>>,
    page: usize,
    total_page: Option<usize>,
    total_docs: Option<usize>,
    docs_per_page: usize,
    enable_row_selection: bool,
    enable_index_column: bool,
    disable_footer: bool,
    manual_pagination: bool,
    disable_default_row_selection: bool,
    select_all_scope: SelectAllScope,
    selected_row: Option<Shared<SelectionMap>>,
    is_loading: bool,
    tabs: Option<Vec<String>>,
    active_tab: Option<String>,
    on_page_change: Option<PageHandler>,
    on_row_click: Option<RowHandler<R>>,
    on_row_double_click: Option<RowHandler<R>>,
    on_row_selection: Option<SelectionHandler>,
    on_select: Option<RowHandler<R>>,
    on_tab_change: Option<TabHandler>,
}

impl<R> TableProps<R> {
    /// Props for `data` shown with `columns`, page 1, 10 rows per page,
    /// manual pagination.
    pub fn new(data: Vec<R>, columns: Vec<Column<R>>) -> Self {
        Self {
            data,
            columns,
            page: 1,
            total_page: None,
            total_docs: None,
            docs_per_page: DEFAULT_PAGE_SIZE,
            enable_row_selection: false,
            enable_index_column: false,
            disable_footer: false,
            manual_pagination: true,
            disable_default_row_selection: false,
            select_all_scope: SelectAllScope::default(),
            selected_row: None,
            is_loading: false,
            tabs: None,
            active_tab: None,
            on_page_change: None,
            on_row_click: None,
            on_row_double_click: None,
            on_row_selection: None,
            on_select: None,
            on_tab_change: None,
        }
    }

    /// Current 1-based page.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Total number of pages, as reported by whoever paginates the data.
    pub fn total_page(mut self, total_page: usize) -> Self {
        self.total_page = Some(total_page);
        self
    }

    /// Total number of records across all pages.
    pub fn total_docs(mut self, total_docs: usize) -> Self {
        self.total_docs = Some(total_docs);
        self
    }

    /// Rows per page.
    pub fn docs_per_page(mut self, docs_per_page: usize) -> Self {
        self.docs_per_page = docs_per_page;
        self
    }

    /// Show checkboxes and allow row selection.
    pub fn enable_row_selection(mut self, enabled: bool) -> Self {
        self.enable_row_selection = enabled;
        self
    }

    /// Show a row-number column.
    pub fn enable_index_column(mut self, enabled: bool) -> Self {
        self.enable_index_column = enabled;
        self
    }

    /// Hide the pagination footer.
    pub fn disable_footer(mut self, disabled: bool) -> Self {
        self.disable_footer = disabled;
        self
    }

    /// `true` (the default): `data` is one page and totals come from the
    /// caller. `false`: `data` is the whole dataset and is sliced here.
    pub fn manual_pagination(mut self, manual: bool) -> Self {
        self.manual_pagination = manual;
        self
    }

    /// Keep selection enabled but drop the built-in checkbox column.
    pub fn disable_default_row_selection(mut self, disabled: bool) -> Self {
        self.disable_default_row_selection = disabled;
        self
    }

    /// Rows affected by "select all".
    pub fn select_all_scope(mut self, scope: SelectAllScope) -> Self {
        self.select_all_scope = scope;
        self
    }

    /// Take selection under caller control. The table reads and writes this
    /// handle and reports every change to `on_row_selection`.
    pub fn selected_row(mut self, selection: Shared<SelectionMap>) -> Self {
        self.selected_row = Some(selection);
        self
    }

    /// Show the loading state instead of the table.
    pub fn is_loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    /// Tab labels shown above the table.
    pub fn tabs<I, S>(mut self, tabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tabs = Some(tabs.into_iter().map(Into::into).collect());
        self
    }

    /// The active tab.
    pub fn active_tab(mut self, tab: impl Into<String>) -> Self {
        self.active_tab = Some(tab.into());
        self
    }

    /// Called with the new page after navigation.
    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Called when a row is clicked.
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    /// Called when a row is double-clicked.
    pub fn on_row_double_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        self.on_row_double_click = Some(Arc::new(f));
        self
    }

    /// Called with the full selection map after every selection change.
    pub fn on_row_selection<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionMap) + Send + Sync + 'static,
    {
        self.on_row_selection = Some(Arc::new(f));
        self
    }

    /// Called with the clicked row's record, after `on_row_click`.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(f));
        self
    }

    /// Called when a tab is chosen.
    pub fn on_tab_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_tab_change = Some(Arc::new(f));
        self
    }
}

impl<R> fmt::Debug for TableProps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProps")
            .field("rows", &self.data.len())
            .field("columns", &self.columns.len())
            .field("page", &self.page)
            .field("total_page", &self.total_page)
            .field("total_docs", &self.total_docs)
            .field("docs_per_page", &self.docs_per_page)
            .field("manual_pagination", &self.manual_pagination)
            .field("is_loading", &self.is_loading)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// DataTable
// =============================================================================

/// Callbacks held by a live table.
struct Handlers<R> {
    on_page_change: Option<PageHandler>,
    on_row_click: Option<RowHandler<R>>,
    on_row_double_click: Option<RowHandler<R>>,
    on_select: Option<RowHandler<R>>,
    on_tab_change: Option<TabHandler>,
}

/// A paginated, selectable table.
pub struct DataTable<R> {
    data: Vec<R>,
    columns: Vec<Column<R>>,
    pager: Pager,
    selection: SelectionTracker,
    total_page: Option<usize>,
    total_docs: Option<usize>,
    enable_row_selection: bool,
    enable_index_column: bool,
    disable_footer: bool,
    disable_default_row_selection: bool,
    select_all_scope: SelectAllScope,
    is_loading: bool,
    tabs: Option<Vec<String>>,
    active_tab: Option<String>,
    handlers: Handlers<R>,
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("pager", &self.pager)
            .field("selection", &self.selection)
            .field("is_loading", &self.is_loading)
            .finish_non_exhaustive()
    }
}

impl<R: Row> DataTable<R> {
    /// Build a table from props.
    ///
    /// Fails on a zero `docs_per_page` or a zero `page`.
    pub fn new(props: TableProps<R>) -> Result<Self, GridError> {
        let mode = if props.manual_pagination {
            PaginationMode::Manual
        } else {
            PaginationMode::Automatic
        };
        let total_items = total_items(
            mode,
            props.data.len(),
            props.total_docs,
            props.total_page,
            props.docs_per_page,
        );
        let pager = Pager::new(mode, props.page, props.docs_per_page, total_items)?;

        let selection = match props.selected_row {
            Some(state) => SelectionTracker::controlled(state, props.on_row_selection),
            None => {
                let tracker = SelectionTracker::uncontrolled();
                match props.on_row_selection {
                    Some(observer) => tracker.with_observer(observer),
                    None => tracker,
                }
            }
        };

        debug!(
            "table: {} rows, {} columns, {:?} pagination, page {}/{}",
            props.data.len(),
            props.columns.len(),
            mode,
            pager.page(),
            pager.total_pages()
        );

        Ok(Self {
            data: props.data,
            columns: props.columns,
            pager,
            selection,
            total_page: props.total_page,
            total_docs: props.total_docs,
            enable_row_selection: props.enable_row_selection,
            enable_index_column: props.enable_index_column,
            disable_footer: props.disable_footer,
            disable_default_row_selection: props.disable_default_row_selection,
            select_all_scope: props.select_all_scope,
            is_loading: props.is_loading,
            tabs: props.tabs,
            active_tab: props.active_tab,
            handlers: Handlers {
                on_page_change: props.on_page_change,
                on_row_click: props.on_row_click,
                on_row_double_click: props.on_row_double_click,
                on_select: props.on_select,
                on_tab_change: props.on_tab_change,
            },
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All rows held by the table (one page in manual mode).
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[R] {
        self.pager.visible(&self.data)
    }

    /// Selection keys of the rows on the current page.
    pub fn visible_keys(&self) -> Vec<RowKey> {
        let offset = self.pager.row_offset();
        self.visible_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| key_or_index(row, offset + i))
            .collect()
    }

    /// Keys "select all" acts on.
    fn scope_keys(&self) -> Vec<RowKey> {
        match (self.select_all_scope, self.pager.mode()) {
            (SelectAllScope::AllPages, PaginationMode::Automatic) => self
                .data
                .iter()
                .enumerate()
                .map(|(i, row)| key_or_index(row, i))
                .collect(),
            _ => self.visible_keys(),
        }
    }

    /// Pagination snapshot.
    pub fn pagination(&self) -> PageInfo {
        self.pager.info()
    }

    /// True on the first page (or when there are no pages).
    pub fn is_first_page(&self) -> bool {
        self.pager.is_first_page()
    }

    /// True on the last page (or when there are no pages).
    pub fn is_last_page(&self) -> bool {
        self.pager.is_last_page()
    }

    /// Current selection map.
    pub fn selection(&self) -> SelectionMap {
        self.selection.snapshot()
    }

    /// Rows whose keys are selected, in data order.
    pub fn selected_rows(&self) -> Vec<&R> {
        let offset = match self.pager.mode() {
            PaginationMode::Manual => self.pager.row_offset(),
            PaginationMode::Automatic => 0,
        };
        self.data
            .iter()
            .enumerate()
            .filter(|(i, row)| self.selection.is_selected(&key_or_index(*row, offset + i)))
            .map(|(_, row)| row)
            .collect()
    }

    /// The active tab, if any.
    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Move to the next page. No-op on the last page.
    pub fn go_to_next_page(&mut self) -> Option<usize> {
        let page = self.pager.go_to_next_page()?;
        self.emit_page_change(page);
        Some(page)
    }

    /// Move to the previous page. No-op on the first page.
    pub fn go_to_previous_page(&mut self) -> Option<usize> {
        let page = self.pager.go_to_previous_page()?;
        self.emit_page_change(page);
        Some(page)
    }

    /// Jump to page `n`, clamped to the valid range. Returns the new page;
    /// `None` (and no `on_page_change`) when the page does not move.
    pub fn go_to_page(&mut self, n: usize) -> Option<usize> {
        let page = self.pager.go_to_page(n)?;
        if page != n {
            debug!("table: page {} clamped to {}", n, page);
        }
        self.emit_page_change(page);
        Some(page)
    }

    fn emit_page_change(&self, page: usize) {
        debug!("table: page -> {}", page);
        if let Some(on_page_change) = &self.handlers.on_page_change {
            on_page_change(page);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip selection of a row by key. Ignored when selection is disabled.
    pub fn toggle_row(&mut self, key: &str) -> SelectionMap {
        if !self.enable_row_selection {
            return self.selection.snapshot();
        }
        self.selection.toggle_row(key)
    }

    /// Flip selection of the row at a position on the current page.
    pub fn toggle_row_at(&mut self, index: usize) -> Option<SelectionMap> {
        let key = self.visible_keys().into_iter().nth(index)?;
        Some(self.toggle_row(&key))
    }

    /// Select every row in scope, or clear them if all are already selected.
    pub fn toggle_all(&mut self) -> SelectionMap {
        if !self.enable_row_selection {
            return self.selection.snapshot();
        }
        let keys = self.scope_keys();
        self.selection.toggle_all(&keys)
    }

    /// Some, but not all, rows in scope are selected.
    pub fn is_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(&self.scope_keys())
    }

    /// Every row in scope is selected.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.scope_keys())
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) -> SelectionMap {
        self.selection.clear()
    }

    // -------------------------------------------------------------------------
    // Row and tab events
    // -------------------------------------------------------------------------

    /// Click the row at a position on the current page. Fires `on_row_click`
    /// then `on_select`. Returns `false` for positions off the page.
    pub fn click_row(&self, index: usize) -> bool {
        let Some(row) = self.visible_rows().get(index) else {
            return false;
        };
        if let Some(on_row_click) = &self.handlers.on_row_click {
            on_row_click(row);
        }
        if let Some(on_select) = &self.handlers.on_select {
            on_select(row);
        }
        true
    }

    /// Double-click the row at a position on the current page.
    pub fn double_click_row(&self, index: usize) -> bool {
        let Some(row) = self.visible_rows().get(index) else {
            return false;
        };
        if let Some(on_row_double_click) = &self.handlers.on_row_double_click {
            on_row_double_click(row);
        }
        true
    }

    /// Choose a tab. Returns `false` if the tab is unknown or tabs are not
    /// wired up.
    pub fn select_tab(&mut self, tab: &str) -> bool {
        let known = self
            .tabs
            .as_ref()
            .is_some_and(|tabs| tabs.iter().any(|t| t == tab));
        let Some(on_tab_change) = self.handlers.on_tab_change.as_ref().filter(|_| known) else {
            return false;
        };
        on_tab_change(tab);
        self.active_tab = Some(tab.to_string());
        true
    }

    // -------------------------------------------------------------------------
    // Caller-driven updates
    // -------------------------------------------------------------------------

    /// Replace the data (a new page arrived, or the dataset changed).
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
        self.sync_totals();
    }

    /// Replace the data along with the totals that describe it.
    pub fn set_page_data(&mut self, data: Vec<R>, page: usize, total_docs: usize) {
        self.data = data;
        self.total_docs = Some(total_docs);
        self.sync_totals();
        self.pager.set_page(page);
    }

    /// Set the current page without firing `on_page_change`.
    pub fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }

    /// Set the total record count.
    pub fn set_total_docs(&mut self, total_docs: Option<usize>) {
        self.total_docs = total_docs;
        self.sync_totals();
    }

    /// Toggle the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Replace the column definitions.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
    }

    fn sync_totals(&mut self) {
        let total = total_items(
            self.pager.mode(),
            self.data.len(),
            self.total_docs,
            self.total_page,
            self.pager.page_size(),
        );
        self.pager.set_total_items(total);
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Project the current state into a grid.
    pub fn render(&self) -> Grid {
        let visible_keys = self.visible_keys();
        let scope_keys = self.scope_keys();

        let tabs = match (&self.tabs, &self.active_tab, &self.handlers.on_tab_change) {
            (Some(tabs), Some(active), Some(_)) => Some(TabBar {
                tabs: tabs.clone(),
                active: active.clone(),
            }),
            _ => None,
        };

        Projection {
            columns: &self.columns,
            visible: self.visible_rows(),
            visible_keys: &visible_keys,
            scope_keys: &scope_keys,
            selection: &self.selection,
            pager: &self.pager,
            leading: LeadingColumns {
                selection: self.enable_row_selection && !self.disable_default_row_selection,
                index: self.enable_index_column,
            },
            is_loading: self.is_loading,
            show_footer: !self.disable_footer,
            tabs,
        }
        .project()
    }
}

/// Item count behind the pager.
///
/// Automatic mode counts the data itself. Manual mode trusts the caller:
/// `total_docs` first, then `total_page` pages of `page_size`, then the size
/// of the supplied page.
fn total_items(
    mode: PaginationMode,
    data_len: usize,
    total_docs: Option<usize>,
    total_page: Option<usize>,
    page_size: usize,
) -> usize {
    match mode {
        PaginationMode::Automatic => data_len,
        PaginationMode::Manual => total_docs
            .or_else(|| total_page.map(|pages| pages.saturating_mul(page_size)))
            .unwrap_or(data_len),
    }
}
