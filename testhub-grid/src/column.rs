//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::row::{CellValue, Row};

/// Renders a cell's value for display. Receives the extracted value and the
/// whole row.
pub type CellRenderer<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// Renders a header from the current page state.
pub type HeaderRenderer = Arc<dyn Fn(&HeaderContext) -> String + Send + Sync>;

/// Extracts a value from a row.
pub type AccessorFn<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Page state handed to header renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderContext {
    /// Every row in the select-all scope is selected.
    pub all_selected: bool,
    /// Some, but not all, rows in the select-all scope are selected.
    pub indeterminate: bool,
    /// Current 1-based page.
    pub page: usize,
    /// Total page count (0 when there is no data).
    pub total_pages: usize,
}

/// Header content for a column.
#[derive(Clone)]
pub enum Header {
    Text(String),
    Render(HeaderRenderer),
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// How a column reads its value from a row.
pub enum Accessor<R> {
    /// Look the value up by key through [`Row::value`].
    Key(String),
    /// Compute the value from the row.
    Fn(AccessorFn<R>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Key(key) => Self::Key(key.clone()),
            Self::Fn(f) => Self::Fn(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Column configuration.
///
/// By default a column reads the row value under its own id and displays it
/// with `Display`.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, Value};
/// use testhub_grid::{Alignment, Column};
///
/// type Record = Map<String, Value>;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name"),
///     Column::new("email", "Email").width(32),
///     Column::new("role", "Role")
///         .align(Alignment::Center)
///         .render(|value, _row: &Record| value.to_string().to_uppercase()),
/// ];
/// ```
pub struct Column<R> {
    /// Unique identifier.
    pub id: String,
    /// Header content.
    pub header: Header,
    /// Value accessor.
    pub accessor: Accessor<R>,
    /// Optional custom cell renderer.
    pub renderer: Option<CellRenderer<R>>,
    /// Fixed width, if any.
    pub width: Option<u16>,
    /// Horizontal alignment.
    pub align: Alignment,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
            width: self.width,
            align: self.align,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("renderer", &self.renderer.as_ref().map(|_| ".."))
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}

impl<R> Column<R> {
    /// Create a column reading the row value stored under `id`.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Key(id.clone()),
            id,
            header: Header::Text(header.into()),
            renderer: None,
            width: None,
            align: Alignment::Left,
        }
    }

    /// Read the value under a different key than the column id.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.accessor = Accessor::Key(key.into());
        self
    }

    /// Compute the value from the row.
    pub fn accessor_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Accessor::Fn(Arc::new(f));
        self
    }

    /// Set a custom cell renderer.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Render the header from page state instead of static text.
    pub fn header_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&HeaderContext) -> String + Send + Sync + 'static,
    {
        self.header = Header::Render(Arc::new(f));
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Header text for the given page state.
    pub fn header_text(&self, cx: &HeaderContext) -> String {
        match &self.header {
            Header::Text(text) => text.clone(),
            Header::Render(render) => render(cx),
        }
    }
}

impl<R: Row> Column<R> {
    /// Apply the accessor to a row.
    pub fn cell_value(&self, row: &R) -> CellValue {
        match &self.accessor {
            Accessor::Key(key) => row.value(key),
            Accessor::Fn(f) => f(row),
        }
    }

    /// Displayed text of this column's cell for a row.
    pub fn display(&self, row: &R) -> String {
        let value = self.cell_value(row);
        match &self.renderer {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}
