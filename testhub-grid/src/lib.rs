//! Paginated, selectable data grid.
//!
//! A headless table model: callers hand over rows and column definitions,
//! drive it with page and selection events, and draw the [`Grid`] it
//! projects.

pub mod column;
pub mod error;
pub mod loading;
pub mod pagination;
pub mod projection;
pub mod row;
pub mod selection;
pub mod state;
pub mod table;

pub use column::{Accessor, Alignment, CellRenderer, Column, Header, HeaderContext};
pub use error::GridError;
pub use loading::LoadingCounter;
pub use pagination::{DEFAULT_PAGE_SIZE, PageInfo, Pager, PaginationMode, total_pages};
pub use projection::{
    CellKind, EMPTY_PLACEHOLDER, Footer, Grid, GridCell, GridRow, Placeholder, RenderState, TabBar,
};
pub use row::{CellValue, Row, RowKey};
pub use selection::{SelectAllScope, SelectionHandler, SelectionMap, SelectionSource, SelectionTracker};
pub use state::Shared;
pub use table::{DataTable, PageHandler, RowHandler, TabHandler, TableProps};
