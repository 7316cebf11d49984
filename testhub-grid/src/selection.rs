//! Row selection tracking.
//!
//! Selection is a map from row key to `bool`; a key missing from the map is
//! unselected. The map lives either inside the tracker (uncontrolled) or in a
//! caller-owned [`Shared`] handle (controlled), see [`SelectionSource`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::row::RowKey;
use crate::state::Shared;

/// Row key → selected.
pub type SelectionMap = BTreeMap<RowKey, bool>;

/// Called with the full selection map after every change.
pub type SelectionHandler = Arc<dyn Fn(&SelectionMap) + Send + Sync>;

/// Which rows "select all" acts on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectAllScope {
    /// Only the rows on the current page.
    #[default]
    VisiblePage,
    /// Every row of the dataset. Only reachable in automatic pagination,
    /// where the full dataset is known; manual tables fall back to the page.
    AllPages,
}

/// Where the selection map lives.
pub enum SelectionSource {
    /// The tracker owns the map.
    Uncontrolled(SelectionMap),
    /// The caller owns the map. Writes go to `state`, then `on_change` runs.
    Controlled {
        state: Shared<SelectionMap>,
        on_change: Option<SelectionHandler>,
    },
}

impl fmt::Debug for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncontrolled(map) => f.debug_tuple("Uncontrolled").field(map).finish(),
            Self::Controlled { state, .. } => f
                .debug_struct("Controlled")
                .field("state", &state.get())
                .finish_non_exhaustive(),
        }
    }
}

impl Default for SelectionSource {
    fn default() -> Self {
        Self::Uncontrolled(SelectionMap::new())
    }
}

/// Selection state with tri-state "select all" support.
///
/// # Example
///
/// ```
/// use testhub_grid::SelectionTracker;
///
/// let keys: Vec<String> = (1..=4).map(|i| i.to_string()).collect();
/// let mut selection = SelectionTracker::uncontrolled();
///
/// selection.toggle_row("2");
/// assert!(selection.is_indeterminate(&keys));
///
/// selection.toggle_all(&keys);
/// assert!(selection.is_all_selected(&keys));
///
/// selection.toggle_all(&keys);
/// assert!(selection.selected_keys().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SelectionTracker {
    source: SelectionSource,
    /// Notified after uncontrolled changes.
    observer: Option<ObserverSlot>,
}

struct ObserverSlot(SelectionHandler);

impl fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectionHandler")
    }
}

impl SelectionTracker {
    /// Tracker owning an empty map.
    pub fn uncontrolled() -> Self {
        Self::default()
    }

    /// Tracker writing through to a caller-owned map.
    pub fn controlled(state: Shared<SelectionMap>, on_change: Option<SelectionHandler>) -> Self {
        Self {
            source: SelectionSource::Controlled { state, on_change },
            observer: None,
        }
    }

    /// Set a handler notified after uncontrolled changes.
    pub fn with_observer(mut self, observer: SelectionHandler) -> Self {
        self.observer = Some(ObserverSlot(observer));
        self
    }

    /// Whether the caller owns the map.
    pub fn is_controlled(&self) -> bool {
        matches!(self.source, SelectionSource::Controlled { .. })
    }

    /// Copy of the current map.
    pub fn snapshot(&self) -> SelectionMap {
        match &self.source {
            SelectionSource::Uncontrolled(map) => map.clone(),
            SelectionSource::Controlled { state, .. } => state.get(),
        }
    }

    fn read<U>(&self, f: impl FnOnce(&SelectionMap) -> U) -> U {
        match &self.source {
            SelectionSource::Uncontrolled(map) => f(map),
            SelectionSource::Controlled { state, .. } => state.with(f),
        }
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.read(|map| is_selected(map, key))
    }

    /// Selected keys, sorted.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.read(|map| {
            map.iter()
                .filter(|&(_, &selected)| selected)
                .map(|(key, _)| key.clone())
                .collect()
        })
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.read(|map| map.values().filter(|&&selected| selected).count())
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `keys` is non-empty and every key in it is selected.
    pub fn is_all_selected(&self, keys: &[RowKey]) -> bool {
        !keys.is_empty() && self.read(|map| keys.iter().all(|key| is_selected(map, key)))
    }

    /// True when some, but not all, of `keys` are selected.
    pub fn is_indeterminate(&self, keys: &[RowKey]) -> bool {
        self.read(|map| {
            let selected = keys.iter().filter(|key| is_selected(map, key)).count();
            selected > 0 && selected < keys.len()
        })
    }

    /// Flip a single key. Returns the updated map.
    pub fn toggle_row(&mut self, key: &str) -> SelectionMap {
        debug!("selection: toggle row {}", key);
        self.apply(|map| {
            if is_selected(map, key) {
                map.remove(key);
            } else {
                map.insert(key.to_string(), true);
            }
        })
    }

    /// Select every key in `keys`, or clear them all if they are already all
    /// selected. Keys outside `keys` are left alone. Returns the updated map.
    pub fn toggle_all(&mut self, keys: &[RowKey]) -> SelectionMap {
        if keys.is_empty() {
            return self.snapshot();
        }

        let clear = self.is_all_selected(keys);
        debug!(
            "selection: toggle all over {} rows ({})",
            keys.len(),
            if clear { "clear" } else { "select" }
        );
        self.apply(|map| {
            for key in keys {
                if clear {
                    map.remove(key);
                } else {
                    map.insert(key.clone(), true);
                }
            }
        })
    }

    /// Clear the whole map. Returns the (empty) map.
    pub fn clear(&mut self) -> SelectionMap {
        self.apply(SelectionMap::clear)
    }

    /// Replace the whole map (an uncontrolled table receiving a new
    /// `selected_row` value, for instance).
    pub fn replace(&mut self, next: SelectionMap) -> SelectionMap {
        self.apply(|map| *map = next)
    }

    fn apply(&mut self, f: impl FnOnce(&mut SelectionMap)) -> SelectionMap {
        match &mut self.source {
            SelectionSource::Uncontrolled(map) => {
                f(map);
                if let Some(ObserverSlot(observer)) = &self.observer {
                    observer(map);
                }
                map.clone()
            }
            SelectionSource::Controlled { state, on_change } => {
                let mut next = SelectionMap::new();
                state.update(|map| {
                    f(map);
                    next = map.clone();
                });
                if let Some(on_change) = on_change {
                    on_change(&next);
                }
                next
            }
        }
    }
}

fn is_selected(map: &SelectionMap, key: &str) -> bool {
    map.get(key).copied().unwrap_or(false)
}
