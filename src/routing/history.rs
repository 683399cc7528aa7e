//! In-memory navigation history.
//!
//! # Responsibilities
//! - Track the visited locations of one client session
//! - Push, replace and traverse entries the way browser history does
//! - Resolve every entry against the shared route table
//!
//! # Design Decisions
//! - The table is passed in explicitly and never mutated
//! - Pushing onto the middle of the history drops the forward entries
//! - Pushing the current location again is a no-op

use std::sync::Arc;

use serde::Serialize;

use crate::routing::error::ResolveResult;
use crate::routing::pattern::Params;
use crate::routing::table::{Navigation, RouteTable, ViewId};

/// One visited location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Path, query and hash, relative to the base.
    pub full_path: String,

    /// Matched route name; `None` for unmatched locations.
    pub route: Option<String>,

    /// View to render; `None` when unmatched and no fallback is configured.
    pub view: Option<ViewId>,

    pub params: Params,
}

impl HistoryEntry {
    fn from_navigation(nav: &Navigation<'_>) -> Self {
        let (route, params) = match nav {
            Navigation::Matched(resolved) => (Some(resolved.name().to_string()), resolved.params().clone()),
            Navigation::NotFound { .. } => (None, Params::new()),
        };
        Self {
            full_path: nav.location().full_path(),
            route,
            view: nav.view().cloned(),
            params,
        }
    }
}

/// Session-local navigator over a shared route table.
#[derive(Debug)]
pub struct Navigator {
    table: Arc<RouteTable>,
    entries: Vec<HistoryEntry>,
    position: usize,
}

impl Navigator {
    /// Create a navigator positioned at `/`.
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self::starting_at(table, "/")
    }

    /// Create a navigator positioned at `target`.
    pub fn starting_at(table: Arc<RouteTable>, target: &str) -> Self {
        let entry = HistoryEntry::from_navigation(&table.navigate(target));
        Self {
            table,
            entries: vec![entry],
            position: 0,
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.position]
    }

    /// Number of entries, including forward entries. Never zero.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    /// Navigate to `target`, adding a history entry.
    pub fn push(&mut self, target: &str) -> &HistoryEntry {
        let entry = HistoryEntry::from_navigation(&self.table.navigate(target));
        if entry.full_path == self.current().full_path {
            tracing::debug!(path = %entry.full_path, "Duplicate navigation ignored");
            return self.current();
        }
        self.entries.truncate(self.position + 1);
        self.entries.push(entry);
        self.position += 1;
        tracing::debug!(path = %self.current().full_path, depth = self.entries.len(), "Pushed location");
        self.current()
    }

    /// Navigate to a named route, adding a history entry.
    pub fn push_named(&mut self, name: &str, params: &Params) -> ResolveResult<&HistoryEntry> {
        let href = self.table.href(name, params)?;
        Ok(self.push(&href))
    }

    /// Navigate to `target`, replacing the current entry.
    pub fn replace(&mut self, target: &str) -> &HistoryEntry {
        let entry = HistoryEntry::from_navigation(&self.table.navigate(target));
        self.entries[self.position] = entry;
        self.current()
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        self.go(1)
    }

    /// Move `delta` entries through the history.
    ///
    /// Returns `None` and stays put if the move leaves the history.
    pub fn go(&mut self, delta: isize) -> Option<&HistoryEntry> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> Navigator {
        Navigator::new(Arc::new(RouteTable::catalog().unwrap()))
    }

    #[test]
    fn test_starts_at_home() {
        let nav = navigator();
        assert_eq!(nav.current().route.as_deref(), Some("Home"));
        assert_eq!(nav.len(), 1);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_push_back_forward() {
        let mut nav = navigator();
        nav.push("/characters");
        let entry = nav.push("/characters/42");
        assert_eq!(entry.route.as_deref(), Some("CharacterDetails"));
        assert_eq!(entry.params.get("id").map(String::as_str), Some("42"));

        assert_eq!(nav.back().unwrap().route.as_deref(), Some("character"));
        assert_eq!(nav.back().unwrap().route.as_deref(), Some("Home"));
        assert!(nav.back().is_none());
        assert_eq!(nav.current().route.as_deref(), Some("Home"));

        assert_eq!(nav.forward().unwrap().full_path, "/characters");
        assert_eq!(nav.go(1).unwrap().full_path, "/characters/42");
        assert!(nav.forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut nav = navigator();
        nav.push("/characters");
        nav.push("/Episodes");
        nav.go(-2);
        nav.push("/Locations");

        assert_eq!(nav.len(), 2);
        assert!(!nav.can_go_forward());
        assert_eq!(nav.current().route.as_deref(), Some("location"));
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut nav = navigator();
        nav.push("/episodes/3");
        nav.push("/episodes/3");
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_replace() {
        let mut nav = navigator();
        nav.push("/characters");
        nav.replace("/locations/5");
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current().route.as_deref(), Some("LocationDetails"));
    }

    #[test]
    fn test_push_named() {
        let mut nav = navigator();
        let params: Params = [("id".to_string(), "7".to_string())].into_iter().collect();
        let entry = nav.push_named("EpisodeDetails", &params).unwrap();
        assert_eq!(entry.full_path, "/episodes/7");

        assert!(nav.push_named("NoSuchRoute", &Params::new()).is_err());
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_unmatched_entry_uses_fallback() {
        let mut nav = navigator();
        let entry = nav.push("/planets/1");
        assert_eq!(entry.route, None);
        assert_eq!(entry.view, Some(ViewId::from("NotFound")));
    }
}
