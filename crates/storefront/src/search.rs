//! Catalog search for the search overlay.
//!
//! Matching is case-insensitive over product titles: every whitespace
//! separated term must appear in the title. A query equal to a product id
//! also matches that product. Results whose title starts with the first
//! term rank ahead of the rest; ties keep catalog order.

use shelf_core::Product;
use tracing::instrument;

use crate::catalog::CatalogIndex;

/// A search result item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub product: &'a Product,
    /// Whether the title starts with the first query term.
    pub prefix_match: bool,
}

/// Search `catalog` for `query`, returning at most `limit` hits.
///
/// An empty or whitespace-only query returns no hits.
#[must_use]
#[instrument(skip(catalog))]
pub fn search<'a>(catalog: &'a CatalogIndex, query: &str, limit: usize) -> Vec<SearchHit<'a>> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    let first = terms.first().map_or("", String::as_str);

    let mut hits: Vec<SearchHit<'a>> = catalog
        .iter()
        .filter_map(|product| {
            let title = product.title.to_lowercase();
            let by_id = product.id.as_str() == query;
            let by_title = terms.iter().all(|term| title.contains(term.as_str()));
            (by_id || by_title).then(|| SearchHit {
                product,
                prefix_match: by_id || title.starts_with(first),
            })
        })
        .collect();

    // Stable sort keeps catalog order within each group
    hits.sort_by_key(|hit| !hit.prefix_match);
    hits.truncate(limit);
    hits
}
