//! Category slugs and URL query synchronisation
//!
//! Only the category filter lives in the URL. It is written as a slug
//! (`"Wood Carving"` → `wood-carving`) and read back on page load.

use crate::core::query::Selection;
use regex::Regex;
use std::sync::OnceLock;

/// Query string parameter carrying the category slug
pub const CATEGORY_PARAM: &str = "category";

/// Convert a label into its URL slug
pub fn slugify(text: &str) -> String {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    static COLLAPSE: OnceLock<Regex> = OnceLock::new();
    let strip = STRIP.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
    let collapse = COLLAPSE.get_or_init(|| Regex::new(r"[\s_-]+").expect("valid regex"));

    let lower = text.to_lowercase();
    let stripped = strip.replace_all(&lower, "");
    let collapsed = collapse.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// A category label with its slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlug {
    pub label: String,
    pub slug: String,
}

/// Bidirectional label/slug lookup over the known categories
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: Vec<CategorySlug>,
}

impl CategoryIndex {
    pub fn new(entries: Vec<CategorySlug>) -> Self {
        Self { entries }
    }

    /// Build an index from labels, deriving each slug with [`slugify`]
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = labels
            .into_iter()
            .map(|label| CategorySlug {
                label: label.as_ref().to_string(),
                slug: slugify(label.as_ref()),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CategorySlug] {
        &self.entries
    }

    /// Slug of a known label, or the slugified label for unknown ones
    pub fn label_to_slug(&self, label: &str) -> String {
        self.entries
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.slug.clone())
            .unwrap_or_else(|| slugify(label))
    }

    /// Label of a known slug (case-insensitive); unknown slugs yield `None`
    pub fn slug_to_label(&self, slug: &str) -> Option<&str> {
        let slug = slug.to_lowercase();
        self.entries
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.label.as_str())
    }

    /// Initial category selection derived from a page's query string
    pub fn initial_selection(&self, query: &str) -> Selection {
        query_param(query, CATEGORY_PARAM)
            .and_then(|slug| self.slug_to_label(&slug))
            .map(|label| Selection::Only(label.to_string()))
            .unwrap_or_default()
    }

    /// Compute the URL update for a new category selection.
    ///
    /// Other parameters are preserved in order. Returns `None` when the query
    /// string would not change, so callers never rewrite identical URLs.
    pub fn sync_query(&self, path: &str, query: &str, selection: &Selection) -> Option<UrlUpdate> {
        let current = query_pairs(query);
        let mut pairs: Vec<(String, String)> = current
            .iter()
            .filter(|(key, _)| key != CATEGORY_PARAM)
            .cloned()
            .collect();

        if let Selection::Only(label) = selection {
            let slug = self.label_to_slug(label);
            // keep the parameter where it was, if it was already present
            let position = current
                .iter()
                .position(|(key, _)| key == CATEGORY_PARAM)
                .unwrap_or(pairs.len());
            pairs.insert(position.min(pairs.len()), (CATEGORY_PARAM.to_string(), slug));
        }

        if pairs == current {
            return None;
        }

        let next = serde_urlencoded::to_string(&pairs).ok()?;
        let href = if next.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, next)
        };
        Some(UrlUpdate::Replace(href))
    }
}

/// How the browser location should change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlUpdate {
    /// Replace the current history entry
    Replace(String),
}

/// Decoded `key=value` pairs of a query string, in order
fn query_pairs(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query.trim_start_matches('?')).unwrap_or_default()
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query_pairs(query)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CategoryIndex {
        CategoryIndex::from_labels(["Textiles", "Wood Carving", "Jewelry"])
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Wood Carving"), "wood-carving");
        assert_eq!(slugify("  Arts & Crafts  "), "arts-crafts");
        assert_eq!(slugify("snake_case--label"), "snake-case-label");
        assert_eq!(slugify("Textiles"), "textiles");
    }

    #[test]
    fn test_slug_round_trip() {
        let index = index();
        assert_eq!(index.label_to_slug("Wood Carving"), "wood-carving");
        assert_eq!(index.slug_to_label("WOOD-CARVING"), Some("Wood Carving"));
        assert_eq!(index.slug_to_label("glassware"), None);
        assert_eq!(index.label_to_slug("Glass Ware"), "glass-ware");
    }

    #[test]
    fn test_initial_selection() {
        let index = index();
        assert_eq!(
            index.initial_selection("?category=jewelry&page=2"),
            Selection::Only("Jewelry".into())
        );
        assert_eq!(index.initial_selection("category=unknown"), Selection::All);
        assert_eq!(index.initial_selection(""), Selection::All);
    }

    #[test]
    fn test_sync_sets_and_preserves_params() {
        let update = index().sync_query(
            "/products",
            "q=silk",
            &Selection::Only("Wood Carving".into()),
        );
        assert_eq!(
            update,
            Some(UrlUpdate::Replace(
                "/products?q=silk&category=wood-carving".into()
            ))
        );
    }

    #[test]
    fn test_sync_removes_param_for_all() {
        let update = index().sync_query("/products", "category=textiles", &Selection::All);
        assert_eq!(update, Some(UrlUpdate::Replace("/products".into())));
    }

    #[test]
    fn test_sync_skips_identical_url() {
        let index = index();
        assert_eq!(
            index.sync_query(
                "/products",
                "category=textiles&q=mat",
                &Selection::Only("Textiles".into())
            ),
            None
        );
        assert_eq!(index.sync_query("/products", "", &Selection::All), None);
    }

    #[test]
    fn test_non_ascii_label_is_percent_encoded() {
        let index = CategoryIndex::from_labels(["Céramique", "Wood Carving"]);

        let update = index.sync_query("/products", "", &Selection::Only("Céramique".into()));
        assert_eq!(
            update,
            Some(UrlUpdate::Replace("/products?category=c%C3%A9ramique".into()))
        );

        assert_eq!(
            index.initial_selection("category=c%C3%A9ramique"),
            Selection::Only("Céramique".into())
        );
        assert_eq!(
            index.sync_query(
                "/products",
                "category=c%C3%A9ramique",
                &Selection::Only("Céramique".into())
            ),
            None
        );
    }

    #[test]
    fn test_sync_encodes_preserved_params() {
        let update = index().sync_query(
            "/products",
            "q=silk+scarf&tag=a%26b",
            &Selection::Only("Jewelry".into()),
        );
        assert_eq!(
            update,
            Some(UrlUpdate::Replace(
                "/products?q=silk+scarf&tag=a%26b&category=jewelry".into()
            ))
        );
    }
}
