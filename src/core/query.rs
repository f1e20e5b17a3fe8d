//! Query specification, sort vocabulary and state transitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Single-valued categorical filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// No filtering on this dimension
    #[default]
    All,
    /// Keep only items matching this label
    Only(String),
}

impl Selection {
    /// Build a selection from a UI label, where "All" and "" mean no filter
    pub fn from_label(label: &str) -> Self {
        if label.is_empty() || label == "All" {
            Selection::All
        } else {
            Selection::Only(label.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(label) => Some(label),
        }
    }
}

/// Inclusive numeric range; `min > max` matches nothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range with only a lower bound, as used by the minimum-rating slider
    pub fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Sort vocabulary shared by all listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Featured,
    Rating,
    PriceLow,
    PriceHigh,
    Newest,
    Experience,
    Products,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Featured,
        SortKey::Rating,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
        SortKey::Experience,
        SortKey::Products,
    ];

    /// Field and direction the comparator table uses for this key
    pub fn field(&self) -> (&'static str, Direction) {
        match self {
            SortKey::Featured => ("is_featured", Direction::Desc),
            SortKey::Rating => ("rating", Direction::Desc),
            SortKey::PriceLow => ("price", Direction::Asc),
            SortKey::PriceHigh => ("price", Direction::Desc),
            SortKey::Newest => ("is_new", Direction::Desc),
            SortKey::Experience => ("years_experience", Direction::Desc),
            SortKey::Products => ("products_count", Direction::Desc),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Experience => "experience",
            SortKey::Products => "products",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Presentation mode; never affects the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Current filter, sort and pagination intent of a listing page
///
/// Created fresh with defaults when a page mounts, changed only through
/// [`QuerySpec::apply`], dropped on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Case-insensitive substring searched in names and search fields
    pub text: String,

    pub category: Selection,

    pub location: Selection,

    /// Selected tags; an item matches when it carries at least one of them
    pub materials: BTreeSet<String>,

    /// Price or rating range; `None` disables the filter
    pub range: Option<NumericRange>,

    pub in_stock_only: bool,

    pub custom_orders_only: bool,

    pub sort: SortKey,

    pub view: ViewMode,

    /// Requested page (starts at 1); `ListingController` clamps the upper bound
    pub page: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: Selection::All,
            location: Selection::All,
            materials: BTreeSet::new(),
            range: None,
            in_stock_only: false,
            custom_orders_only: false,
            sort: SortKey::Featured,
            view: ViewMode::Grid,
            page: 1,
        }
    }
}

/// A single user interaction on a listing page
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    SetText(String),
    SetCategory(Selection),
    SetLocation(Selection),
    ToggleMaterial(String),
    SetMaterials(BTreeSet<String>),
    SetRange(Option<NumericRange>),
    SetInStockOnly(bool),
    SetCustomOrdersOnly(bool),
    SetSort(SortKey),
    SetView(ViewMode),
    SetPage(usize),
    NextPage,
    PrevPage,
    ClearFilters,
}

impl QuerySpec {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Apply an interaction and return the next spec.
    ///
    /// Filter and sort changes reset the page to 1, unless the new value equals
    /// the current one, in which case the spec is returned untouched.
    pub fn apply(&self, action: QueryAction) -> QuerySpec {
        let mut next = self.clone();
        match action {
            QueryAction::SetText(text) => next.text = text,
            QueryAction::SetCategory(category) => next.category = category,
            QueryAction::SetLocation(location) => next.location = location,
            QueryAction::ToggleMaterial(material) => {
                if !next.materials.remove(&material) {
                    next.materials.insert(material);
                }
            }
            QueryAction::SetMaterials(materials) => next.materials = materials,
            QueryAction::SetRange(range) => next.range = range,
            QueryAction::SetInStockOnly(flag) => next.in_stock_only = flag,
            QueryAction::SetCustomOrdersOnly(flag) => next.custom_orders_only = flag,
            QueryAction::SetSort(sort) => next.sort = sort,
            QueryAction::SetView(view) => {
                next.view = view;
                return next;
            }
            QueryAction::SetPage(page) => {
                next.page = page.max(1);
                return next;
            }
            QueryAction::NextPage => {
                next.page = self.page() + 1;
                return next;
            }
            QueryAction::PrevPage => {
                next.page = self.page().saturating_sub(1).max(1);
                return next;
            }
            QueryAction::ClearFilters => {
                next = QuerySpec {
                    view: self.view,
                    ..QuerySpec::default()
                };
            }
        }

        if next.same_result_set(self) {
            return self.clone();
        }
        next.page = 1;
        next
    }

    /// Whether any filter differs from its default
    pub fn has_active_filters(&self) -> bool {
        !self.text.trim().is_empty()
            || !self.category.is_all()
            || !self.location.is_all()
            || !self.materials.is_empty()
            || self.range.is_some()
            || self.in_stock_only
            || self.custom_orders_only
    }

    fn same_result_set(&self, other: &QuerySpec) -> bool {
        self.text == other.text
            && self.category == other.category
            && self.location == other.location
            && self.materials == other.materials
            && self.range == other.range
            && self.in_stock_only == other.in_stock_only
            && self.custom_orders_only == other.custom_orders_only
            && self.sort == other.sort
    }
}
