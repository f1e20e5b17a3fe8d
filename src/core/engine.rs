//! Catalog query engine: filter, sort and paginate an in-memory collection
//!
//! The engine is a pure function of `(collection, spec)`. It does no I/O, holds
//! no state between calls and cannot fail; callers re-run it whenever their
//! [`QuerySpec`] changes.
//!
//! ```rust,ignore
//! let engine = QueryEngine::new(12);
//! let spec = QuerySpec::default().apply(QueryAction::SetSort(SortKey::PriceLow));
//! let page = engine.evaluate(&products, &spec);
//! println!("{} of {} products", page.data.len(), page.pagination.total);
//! ```

use crate::core::entity::CatalogItem;
use crate::core::pagination::{DEFAULT_PAGE_SIZE, PaginatedResponse, PaginationMeta};
use crate::core::query::{Direction, QuerySpec, Selection, SortKey};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Filter → sort → paginate over an already-fetched collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    page_size: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryEngine {
    /// Create an engine with the given page size (at least 1)
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run the full pipeline and return the visible page
    pub fn evaluate<'a, T: CatalogItem>(
        &self,
        collection: &'a [T],
        spec: &QuerySpec,
    ) -> PaginatedResponse<&'a T> {
        let filtered = self.filter(collection, spec);
        let sorted = self.sort(filtered, spec.sort);
        let response = self.paginate(sorted, spec.page());

        tracing::debug!(
            resource = T::resource_name(),
            collection = collection.len(),
            matched = response.pagination.total,
            page = response.pagination.page,
            total_pages = response.pagination.total_pages,
            "catalog query evaluated"
        );

        response
    }

    /// Keep the items satisfying every active predicate, in collection order
    pub fn filter<'a, T: CatalogItem>(&self, collection: &'a [T], spec: &QuerySpec) -> Vec<&'a T> {
        let needle = spec.text.to_lowercase();
        collection
            .iter()
            .filter(|item| matches_cheap(*item, spec) && matches_text(*item, &needle))
            .collect()
    }

    /// Stable sort by the comparator selected for `key`.
    ///
    /// Keys the entity does not list in [`CatalogItem::sort_keys`] sort as
    /// [`SortKey::Featured`].
    pub fn sort<'a, T: CatalogItem>(&self, mut items: Vec<&'a T>, key: SortKey) -> Vec<&'a T> {
        let key = if T::sort_keys().contains(&key) {
            key
        } else {
            SortKey::Featured
        };
        let (field, direction) = key.field();

        // slice::sort_by is stable: equal keys keep collection order
        items.sort_by(|a, b| {
            let ordering = compare_field(*a, *b, field);
            match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
        items
    }

    /// Slice out the requested page, clamping it into range
    pub fn paginate<T>(&self, items: Vec<T>, page: usize) -> PaginatedResponse<T> {
        let pagination = PaginationMeta::new(page, self.page_size, items.len());
        let bounds = pagination.bounds();
        let data = items
            .into_iter()
            .skip(bounds.start)
            .take(bounds.len())
            .collect();

        PaginatedResponse { data, pagination }
    }
}

fn matches_cheap<T: CatalogItem>(item: &T, spec: &QuerySpec) -> bool {
    if spec.in_stock_only && !item.in_stock() {
        return false;
    }
    if spec.custom_orders_only && !item.accepts_custom_orders() {
        return false;
    }
    if let Selection::Only(label) = &spec.category {
        if !item.matches_category(label) {
            return false;
        }
    }
    if let Selection::Only(location) = &spec.location {
        if item.location() != Some(location.as_str()) {
            return false;
        }
    }
    if let Some(range) = &spec.range {
        if !range.contains(item.range_value()) {
            return false;
        }
    }
    if !spec.materials.is_empty() && !item.tags().iter().any(|t| spec.materials.contains(t)) {
        return false;
    }
    true
}

fn matches_text<T: CatalogItem>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.name().to_lowercase().contains(needle)
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

fn compare_field<T: CatalogItem>(a: &T, b: &T, field: &str) -> Ordering {
    match (a.field_value(field), b.field_value(field)) {
        (Some(x), Some(y)) => x.compare(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Number of items per category label, in order of first appearance
pub fn category_counts<'a, T, F>(collection: &'a [T], category_of: F) -> Vec<(String, usize)>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in collection {
        let label = category_of(item);
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}

/// Distinct tags in order of first appearance, optionally limited to one category
pub fn tag_universe<T: CatalogItem>(collection: &[T], category: &Selection) -> Vec<String> {
    let mut seen = HashSet::new();
    collection
        .iter()
        .filter(|item| category.label().is_none_or(|label| item.matches_category(label)))
        .flat_map(|item| item.tags().iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::field::{FieldValue, ItemId};
    use crate::core::query::{NumericRange, QueryAction};

    #[derive(Clone, Debug)]
    struct Widget {
        id: i64,
        name: String,
        category: String,
        price: f64,
        tags: Vec<String>,
        featured: bool,
        in_stock: bool,
    }

    impl Entity for Widget {
        fn resource_name() -> &'static str {
            "widgets"
        }

        fn resource_name_singular() -> &'static str {
            "widget"
        }

        fn id(&self) -> ItemId {
            ItemId::Int(self.id)
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    impl CatalogItem for Widget {
        fn matches_category(&self, label: &str) -> bool {
            self.category == label
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn range_value(&self) -> f64 {
            self.price
        }

        fn in_stock(&self) -> bool {
            self.in_stock
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "price" => Some(self.price.into()),
                "is_featured" => Some(self.featured.into()),
                _ => None,
            }
        }

        fn sort_keys() -> &'static [SortKey] {
            &[SortKey::Featured, SortKey::PriceLow, SortKey::PriceHigh]
        }
    }

    fn widget(id: i64, category: &str, price: f64) -> Widget {
        Widget {
            id,
            name: format!("Widget {}", id),
            category: category.to_string(),
            price,
            tags: vec![format!("tag-{}", id % 3)],
            featured: false,
            in_stock: id % 2 == 0,
        }
    }

    fn ids(page: &PaginatedResponse<&Widget>) -> Vec<i64> {
        page.data.iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_default_spec_keeps_everything() {
        let items: Vec<_> = (1..=5).map(|i| widget(i, "a", 10.0)).collect();
        let page = QueryEngine::default().evaluate(&items, &QuerySpec::default());
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let items = vec![
            widget(1, "a", 10.0),
            widget(2, "a", 10.0),
            widget(4, "b", 10.0),
            widget(6, "a", 99.0),
        ];
        let spec = QuerySpec {
            category: Selection::Only("a".into()),
            range: Some(NumericRange::new(0.0, 50.0)),
            in_stock_only: true,
            ..QuerySpec::default()
        };
        let page = QueryEngine::default().evaluate(&items, &spec);
        assert_eq!(ids(&page), vec![2]);
    }

    #[test]
    fn test_unsupported_sort_falls_back_to_featured() {
        let mut items: Vec<_> = (1..=4).map(|i| widget(i, "a", i as f64)).collect();
        items[2].featured = true;
        let spec = QuerySpec::default().apply(QueryAction::SetSort(SortKey::Experience));
        let page = QueryEngine::default().evaluate(&items, &spec);
        assert_eq!(ids(&page), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_price_sorts() {
        let items = vec![
            widget(1, "a", 30.0),
            widget(2, "a", 10.0),
            widget(3, "a", 20.0),
        ];
        let engine = QueryEngine::default();
        let low = engine.sort(engine.filter(&items, &QuerySpec::default()), SortKey::PriceLow);
        assert_eq!(low.iter().map(|w| w.id).collect::<Vec<_>>(), vec![2, 3, 1]);
        let high = engine.sort(engine.filter(&items, &QuerySpec::default()), SortKey::PriceHigh);
        assert_eq!(high.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_page_size_floor() {
        assert_eq!(QueryEngine::new(0).page_size(), 1);
    }

    #[test]
    fn test_category_counts_and_tags() {
        let items = vec![widget(1, "a", 1.0), widget(2, "b", 1.0), widget(3, "a", 1.0)];
        let counts = category_counts(&items, |w| w.category.as_str());
        assert_eq!(counts, vec![("a".to_string(), 2), ("b".to_string(), 1)]);

        let all = tag_universe(&items, &Selection::All);
        assert_eq!(all, vec!["tag-1", "tag-2", "tag-0"]);
        let only_a = tag_universe(&items, &Selection::Only("a".into()));
        assert_eq!(only_a, vec!["tag-1", "tag-0"]);
    }
}
