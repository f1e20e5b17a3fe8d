//! Configuration loading and management

use crate::core::error::CatalogError;
use crate::core::navigation::{CategoryIndex, CategorySlug, slugify};
use crate::core::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

/// A browsable category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Display label (e.g., "Wood Carving")
    pub label: String,

    /// URL slug; derived from the label when omitted
    #[serde(default)]
    pub slug: Option<String>,

    /// Short description shown on the category banner
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryConfig {
    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.label))
    }
}

/// Connection to the hosted database's REST interface
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[validate(url)]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Two-column table used by the remote key-value store
    #[serde(default = "default_store_table")]
    pub store_table: String,
}

fn default_api_key_env() -> String {
    "CATALOG_API_KEY".to_string()
}

fn default_store_table() -> String {
    "kv_store".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_window() -> usize {
    DEFAULT_PAGE_WINDOW
}

/// Complete configuration of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogConfig {
    /// Items per listing page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,

    /// Number of page buttons shown by pagination controls
    #[serde(default = "default_page_window")]
    #[validate(range(min = 1))]
    pub pagination_window: usize,

    /// Known categories, in display order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Optional remote backend
    #[serde(default)]
    #[validate(nested)]
    pub remote: Option<RemoteConfig>,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Validate field bounds and slug uniqueness
    pub fn check(&self) -> Result<(), CatalogError> {
        self.validate().map_err(CatalogError::config)?;

        let mut seen = HashSet::new();
        for category in &self.categories {
            let slug = category.slug();
            if !seen.insert(slug.clone()) {
                return Err(CatalogError::config(format!(
                    "duplicate category slug '{}'",
                    slug
                )));
            }
        }
        Ok(())
    }

    /// Slug lookup over the configured categories
    pub fn category_index(&self) -> CategoryIndex {
        CategoryIndex::new(
            self.categories
                .iter()
                .map(|c| CategorySlug {
                    label: c.label.clone(),
                    slug: c.slug(),
                })
                .collect(),
        )
    }

    /// The storefront's default configuration
    pub fn default_config() -> Self {
        let categories = [
            ("Textiles", "Traditional Malagasy fabrics, garments, and woven goods."),
            ("Wood Carving", "Handcrafted sculptures carved from unique hardwoods."),
            ("Jewelry", "Traditional and contemporary jewelry with local gemstones."),
            ("Basketry", "Woven baskets made from sustainable raffia."),
            ("Pottery", "Ceramic vessels shaped using traditional methods."),
            ("Metalwork", "Forged metal items showcasing blacksmithing skills."),
        ]
        .into_iter()
        .map(|(label, description)| CategoryConfig {
            label: label.to_string(),
            slug: None,
            description: Some(description.to_string()),
        })
        .collect();

        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pagination_window: DEFAULT_PAGE_WINDOW,
            categories,
            remote: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
