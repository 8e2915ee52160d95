//! Catalog State
//!
//! Holds the fetched categories and items plus the navigation cursor
//! (selected category, selected item).
//!
//! Item fetches are "last request wins": every category selection bumps a
//! generation counter, and a fetch result is only applied when the request
//! that produced it is still the current one.

use log::debug;

use crate::error::AppError;
use crate::models::{Category, Item};

/// Token for an in-flight item fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsRequest {
    pub category_id: String,
    generation: u64,
}

/// What happened to a fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Result replaced the item list (number of items)
    Applied(usize),
    /// Result belonged to a superseded selection and was dropped
    Stale,
    /// Current request failed; the previous list is untouched
    Failed(AppError),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    categories: Vec<Category>,
    items: Vec<Item>,
    /// Category the in-memory item list belongs to
    items_category: Option<String>,
    selected_category: Option<String>,
    selected_item: Option<String>,
    /// Category whose latest item fetch failed
    failed: Option<String>,
    generation: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category_id(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    /// Replace the category list (fetch order is kept, upstream sorts by name)
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Apply a category fetch result; failures leave the list as it was
    pub fn settle_categories(&mut self, result: Result<Vec<Category>, AppError>) -> Result<usize, AppError> {
        let categories = result?;
        let count = categories.len();
        self.replace_categories(categories);
        Ok(count)
    }

    /// Open a category (or go back to the category list with `None`).
    ///
    /// The item selection is always cleared: an open item never outlives the
    /// category it was opened from.
    pub fn select_category(&mut self, id: Option<String>) -> Option<ItemsRequest> {
        self.generation += 1;
        self.selected_item = None;
        self.failed = None;
        self.selected_category = id.clone();

        id.map(|category_id| ItemsRequest {
            category_id,
            generation: self.generation,
        })
    }

    /// Whether a fetch started for `request` would still be applied
    pub fn is_current(&self, request: &ItemsRequest) -> bool {
        request.generation == self.generation
            && self.selected_category.as_deref() == Some(request.category_id.as_str())
    }

    /// Apply an item fetch result if it answers the latest selection
    pub fn settle_items(&mut self, request: &ItemsRequest, result: Result<Vec<Item>, AppError>) -> Settled {
        if !self.is_current(request) {
            debug!(
                "discarding stale items for category {} (generation {}, current {})",
                request.category_id, request.generation, self.generation
            );
            return Settled::Stale;
        }

        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                self.items_category = Some(request.category_id.clone());
                self.failed = None;
                Settled::Applied(count)
            }
            Err(err) => {
                self.failed = Some(request.category_id.clone());
                Settled::Failed(err)
            }
        }
    }

    /// The open category's latest item fetch failed
    pub fn items_failed(&self) -> bool {
        self.failed.is_some() && self.failed == self.selected_category
    }

    /// Items for the selected category, once they have arrived
    pub fn loaded_items(&self) -> Option<&[Item]> {
        match (&self.selected_category, &self.items_category) {
            (Some(selected), Some(loaded)) if selected == loaded => Some(&self.items),
            _ => None,
        }
    }

    /// Open an item from the loaded list, or close the detail view with `None`.
    ///
    /// Returns false (and changes nothing) for an id that is not in the
    /// selected category's loaded items.
    pub fn select_item(&mut self, id: Option<String>) -> bool {
        match id {
            None => {
                self.selected_item = None;
                true
            }
            Some(id) => {
                let known = self
                    .loaded_items()
                    .is_some_and(|items| items.iter().any(|item| item.id == id));
                if known {
                    self.selected_item = Some(id);
                }
                known
            }
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let id = self.selected_item.as_deref()?;
        self.loaded_items()?.iter().find(|item| item.id == id)
    }

    /// Name of the bin the open item belongs in
    pub fn selected_item_bin(&self) -> Option<&str> {
        self.category_name(&self.selected_item()?.category_id)
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    /// Drop a deleted category; closes it if it was open
    pub fn remove_category(&mut self, id: &str) {
        self.categories.retain(|category| category.id != id);
        if self.selected_category.as_deref() == Some(id) {
            self.select_category(None);
        }
        if self.items_category.as_deref() == Some(id) {
            self.items.clear();
            self.items_category = None;
        }
    }

    /// Drop a deleted item; closes it if it was open
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
        if self.selected_item.as_deref() == Some(id) {
            self.selected_item = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Resource;

    pub(crate) fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("/images/{}.png", id),
        }
    }

    pub(crate) fn item(id: &str, category_id: &str, name: &str) -> Item {
        Item {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            image: String::new(),
            decompose_time: "10 years".to_string(),
            results: None,
            benefits: None,
        }
    }

    fn loaded_state() -> CatalogState {
        let mut state = CatalogState::new();
        state.replace_categories(vec![category("glass", "Glass"), category("plastic", "Plastic")]);
        let request = state.select_category(Some("plastic".to_string())).unwrap();
        state.settle_items(
            &request,
            Ok(vec![item("bottle", "plastic", "Bottle"), item("bag", "plastic", "Bag")]),
        );
        state
    }

    #[test]
    fn test_select_category_issues_request() {
        let mut state = CatalogState::new();
        let request = state.select_category(Some("glass".to_string())).unwrap();
        assert_eq!(request.category_id, "glass");
        assert!(state.is_current(&request));
        assert!(state.loaded_items().is_none());
    }

    #[test]
    fn test_clearing_category_issues_no_request() {
        let mut state = loaded_state();
        assert!(state.select_category(None).is_none());
        assert_eq!(state.selected_category_id(), None);
    }

    #[test]
    fn test_clearing_category_clears_item() {
        let mut state = loaded_state();
        assert!(state.select_item(Some("bottle".to_string())));
        assert_eq!(state.selected_item_id(), Some("bottle"));

        state.select_category(None);
        assert_eq!(state.selected_item_id(), None);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn test_returning_to_category_does_not_restore_item() {
        let mut state = loaded_state();
        state.select_item(Some("bag".to_string()));

        state.select_category(None);
        let request = state.select_category(Some("plastic".to_string())).unwrap();
        state.settle_items(&request, Ok(vec![item("bag", "plastic", "Bag")]));

        assert_eq!(state.selected_item_id(), None);
    }

    #[test]
    fn test_last_selection_wins_when_earlier_fetch_resolves_late() {
        let mut state = CatalogState::new();
        let a = state.select_category(Some("glass".to_string())).unwrap();
        let b = state.select_category(Some("plastic".to_string())).unwrap();

        assert_eq!(state.settle_items(&b, Ok(vec![item("bottle", "plastic", "Bottle")])), Settled::Applied(1));
        assert_eq!(state.settle_items(&a, Ok(vec![item("jar", "glass", "Jar")])), Settled::Stale);

        let items = state.loaded_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category_id, "plastic");
    }

    #[test]
    fn test_reselecting_same_category_supersedes_older_request() {
        let mut state = CatalogState::new();
        let first = state.select_category(Some("glass".to_string())).unwrap();
        let second = state.select_category(Some("glass".to_string())).unwrap();

        assert_eq!(state.settle_items(&first, Ok(vec![])), Settled::Stale);
        assert_eq!(state.settle_items(&second, Ok(vec![item("jar", "glass", "Jar")])), Settled::Applied(1));
    }

    #[test]
    fn test_failed_fetch_keeps_previous_items() {
        let mut state = loaded_state();
        let request = state.select_category(Some("plastic".to_string())).unwrap();
        let err = AppError::fetch(Resource::Items, "offline");

        assert_eq!(state.settle_items(&request, Err(err.clone())), Settled::Failed(err));
        assert_eq!(state.loaded_items().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_fetch_of_new_category_is_reported() {
        let mut state = CatalogState::new();
        let glass = state.select_category(Some("glass".to_string())).unwrap();
        assert_eq!(state.settle_items(&glass, Ok(vec![item("jar", "glass", "Jar")])), Settled::Applied(1));

        let plastic = state.select_category(Some("plastic".to_string())).unwrap();
        let err = AppError::fetch(Resource::Items, "offline");
        assert_eq!(state.settle_items(&plastic, Err(err.clone())), Settled::Failed(err));
        assert!(state.items_failed());
        assert!(state.loaded_items().is_none());

        let retry = state.select_category(Some("plastic".to_string())).unwrap();
        assert!(!state.items_failed());
        state.settle_items(&retry, Ok(vec![item("bottle", "plastic", "Bottle")]));
        assert!(!state.items_failed());
        assert_eq!(state.loaded_items().unwrap().len(), 1);
    }

    #[test]
    fn test_stale_failure_is_silent() {
        let mut state = CatalogState::new();
        let a = state.select_category(Some("glass".to_string())).unwrap();
        state.select_category(Some("plastic".to_string()));

        let settled = state.settle_items(&a, Err(AppError::fetch(Resource::Items, "boom")));
        assert_eq!(settled, Settled::Stale);
        assert!(!state.items_failed());
    }

    #[test]
    fn test_failed_category_fetch_keeps_list() {
        let mut state = loaded_state();
        let result = state.settle_categories(Err(AppError::fetch(Resource::Categories, "offline")));
        assert!(result.is_err());
        assert_eq!(state.categories().len(), 2);
    }

    #[test]
    fn test_select_unknown_item_is_rejected() {
        let mut state = loaded_state();
        assert!(!state.select_item(Some("jar".to_string())));
        assert_eq!(state.selected_item_id(), None);
    }

    #[test]
    fn test_remove_selected_category_returns_to_list() {
        let mut state = loaded_state();
        state.select_item(Some("bottle".to_string()));
        state.remove_category("plastic");

        assert_eq!(state.selected_category_id(), None);
        assert_eq!(state.selected_item_id(), None);
        assert_eq!(state.categories().len(), 1);
        assert_eq!(state.category_name("glass"), Some("Glass"));
    }

    #[test]
    fn test_selected_item_bin_is_its_category() {
        let mut state = loaded_state();
        assert_eq!(state.selected_item_bin(), None);

        state.select_item(Some("bag".to_string()));
        assert_eq!(state.selected_item_bin(), Some("Plastic"));
    }

    #[test]
    fn test_remove_selected_item_closes_it() {
        let mut state = loaded_state();
        state.select_item(Some("bottle".to_string()));
        state.remove_item("bottle");

        assert!(state.selected_item().is_none());
        assert_eq!(state.loaded_items().unwrap().len(), 1);
    }
}
