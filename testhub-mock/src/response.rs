//! Response envelope shared by all endpoints.

use serde::{Deserialize, Serialize};
use testhub_grid::total_pages;

/// Paging details for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Total records across all pages.
    pub total: usize,
    /// Current page, 1-based.
    pub page: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Page size.
    pub limit: usize,
}

impl Metadata {
    /// Metadata for `page` of a `total`-record listing at `limit` per page.
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        Self {
            total,
            page,
            page_count: total_pages(total, limit),
            limit,
        }
    }
}

/// Envelope around endpoint data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl<T> ApiResponse<T> {
    /// Creates a response with a message and no metadata.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data,
            metadata: None,
        }
    }

    /// Sets the paging metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Consumes the response and returns the data.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// One slice of an open-ended feed.
///
/// The cursor is opaque to callers; pass `next_cursor` back to get the slice
/// that follows. `has_more` is `false` on the last slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
    has_more: bool,
}

impl<T> CursorPage<T> {
    /// Creates a final slice.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            has_more: false,
        }
    }

    /// Marks the slice as followed by the one at `cursor`.
    pub fn with_next_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(cursor.into());
        self.has_more = true;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
