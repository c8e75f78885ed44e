//! Pure query functions over any slice of [`Searchable`] items.
//!
//! These work on a plain fixture slice as well as on a [`ContentStore`]'s
//! records. The store adds an id index and a pre-normalized search index on
//! top of the same semantics.
//!
//! [`ContentStore`]: crate::ContentStore

use std::collections::HashSet;

use medcontent_types::{Category, Searchable};

/// Normalizes a query or field for comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Finds the item with exactly this id (case-sensitive).
///
/// Linear; use [`ContentStore::get_by_id`](crate::ContentStore::get_by_id)
/// for indexed lookup.
pub fn get_by_id<'a, T: Searchable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Returns every item whose category is in `categories`, in input order.
///
/// An empty set matches nothing. Items whose category is not recognised
/// never match.
pub fn filter_by_category<'a, T: Searchable>(
    items: &'a [T],
    categories: &HashSet<Category>,
) -> Vec<&'a T> {
    if categories.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| {
            item.category()
                .is_some_and(|category| categories.contains(&category))
        })
        .collect()
}

/// Returns true if the normalized query is a substring of any searchable
/// field of `item`.
pub fn matches_query<T: Searchable>(item: &T, normalized_query: &str) -> bool {
    item.searchable_text()
        .iter()
        .any(|field| normalize(field).contains(normalized_query))
}

/// Case-insensitive substring search across every searchable field, in
/// input order.
///
/// The empty query is a substring of everything and returns every item.
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = normalize(query);
    items
        .iter()
        .filter(|item| matches_query(*item, &query))
        .collect()
}
