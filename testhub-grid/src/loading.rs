//! Nested loading indicator.

/// Reference-counted loading flag.
///
/// The indicator shows while `show` has been called more times than `hide`,
/// so nested operations can each bracket their own work without hiding the
/// indicator for one another.
///
/// # Example
///
/// ```
/// use testhub_grid::LoadingCounter;
///
/// let mut loading = LoadingCounter::new();
/// loading.show("Loading users");
/// loading.show("Loading posts");
///
/// loading.hide();
/// assert!(loading.is_showing());
///
/// loading.hide();
/// assert!(!loading.is_showing());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingCounter {
    show_count: usize,
    showing: bool,
    showing_next: bool,
    content: String,
}

impl LoadingCounter {
    /// Create a hidden counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an operation. The latest content wins.
    pub fn show(&mut self, content: impl Into<String>) {
        self.show_count += 1;
        self.content = content.into();
        self.showing = true;
    }

    /// Finish an operation. Extra calls while hidden are ignored.
    pub fn hide(&mut self) {
        if !self.showing {
            return;
        }
        self.show_count = self.show_count.saturating_sub(1);
        self.showing = self.show_count > 0;
    }

    /// Whether the indicator is visible.
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Outstanding operations.
    pub fn count(&self) -> usize {
        self.show_count
    }

    /// Text of the most recent `show`.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the indicator for a pending page transition is up.
    pub fn is_showing_next(&self) -> bool {
        self.showing_next
    }

    /// Set the page-transition indicator. Returns `true` if it changed.
    pub fn set_showing_next(&mut self, showing: bool) -> bool {
        if self.showing_next == showing {
            return false;
        }
        self.showing_next = showing;
        true
    }
}
