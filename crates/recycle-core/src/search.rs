//! Search Filter
//!
//! Pure projection of [`CatalogState`] through a free-text query. Nothing here
//! performs I/O or mutates the catalog.

use crate::catalog::CatalogState;
use crate::models::{Category, Item};

/// URL parameters that may carry an initial search query, in priority order
pub const QUERY_PARAMS: &[&str] = &["q", "s", "search", "query"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Categories,
    Items,
}

/// Display-ready sidebar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    Categories(Vec<&'a Category>),
    Items(Vec<&'a Item>),
    /// Query matched nothing
    NoResults(ListingKind),
    /// A category is open but its items have not arrived yet
    Loading,
    /// The open category's items could not be fetched
    Failed,
}

impl Listing<'_> {
    pub fn kind(&self) -> Option<ListingKind> {
        match self {
            Listing::Categories(_) => Some(ListingKind::Categories),
            Listing::Items(_) => Some(ListingKind::Items),
            Listing::NoResults(kind) => Some(*kind),
            Listing::Loading | Listing::Failed => None,
        }
    }
}

fn matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

/// Filter categories (nothing selected) or the open category's items by name.
///
/// Matching is a case-insensitive substring test; order is the fetch order.
pub fn filter<'a>(catalog: &'a CatalogState, query: &str) -> Listing<'a> {
    let needle = query.to_lowercase();

    if catalog.selected_category_id().is_none() {
        let found: Vec<&Category> = catalog
            .categories()
            .iter()
            .filter(|category| matches(&category.name, &needle))
            .collect();
        return if found.is_empty() {
            Listing::NoResults(ListingKind::Categories)
        } else {
            Listing::Categories(found)
        };
    }

    let Some(items) = catalog.loaded_items() else {
        return if catalog.items_failed() { Listing::Failed } else { Listing::Loading };
    };

    let found: Vec<&Item> = items.iter().filter(|item| matches(&item.name, &needle)).collect();
    if found.is_empty() {
        Listing::NoResults(ListingKind::Items)
    } else {
        Listing::Items(found)
    }
}

/// First non-empty query parameter among [`QUERY_PARAMS`]
pub fn initial_query<'a, I>(params: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
{
    QUERY_PARAMS.iter().find_map(|wanted| {
        params
            .clone()
            .into_iter()
            .find(|(key, value)| key == wanted && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    })
}
