//! Artisan entity and its backend row mapping

use crate::core::entity::{CatalogItem, Entity};
use crate::core::field::{FieldValue, ItemId};
use crate::core::query::SortKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const AVATAR_PLACEHOLDER: &str = "/placeholder-user.jpg";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const DEFAULT_BIO: &str = "Talented artisan creating beautiful handmade items.";
pub const DEFAULT_CRAFTS: [&str; 3] = ["Handmade", "Traditional", "Craft"];

/// A maker listed on the artisans page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artisan {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub crafts: Vec<String>,
    #[serde(default)]
    pub products_count: u32,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub accepts_custom_orders: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Artisan {
    fn resource_name() -> &'static str {
        "artisans"
    }

    fn resource_name_singular() -> &'static str {
        "artisan"
    }

    fn id(&self) -> ItemId {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogItem for Artisan {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.location.as_str()];
        fields.extend(self.crafts.iter().map(String::as_str));
        fields
    }

    /// An artisan belongs to every category listed among its crafts
    fn matches_category(&self, label: &str) -> bool {
        self.crafts.iter().any(|craft| craft == label)
    }

    fn location(&self) -> Option<&str> {
        Some(&self.location)
    }

    fn tags(&self) -> &[String] {
        &self.crafts
    }

    fn range_value(&self) -> f64 {
        self.rating
    }

    fn accepts_custom_orders(&self) -> bool {
        self.accepts_custom_orders
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.as_str().into()),
            "location" => Some(self.location.as_str().into()),
            "rating" => Some(self.rating.into()),
            "reviews" => Some(self.reviews.into()),
            "products_count" => Some(self.products_count.into()),
            "years_experience" => Some(self.years_experience.into()),
            "is_featured" => Some(self.featured.into()),
            _ => None,
        }
    }

    fn sort_keys() -> &'static [SortKey] {
        &[
            SortKey::Featured,
            SortKey::Rating,
            SortKey::Experience,
            SortKey::Products,
        ]
    }
}

/// `users` row joined with its `artisan_profiles` row, as returned by the
/// hosted backend
#[derive(Debug, Clone, Deserialize)]
pub struct ArtisanRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub artisan_profiles: Option<ArtisanProfileRow>,
}

/// Nullable profile columns of an artisan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtisanProfileRow {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub years_experience: Option<u32>,
    pub crafts: Option<Vec<String>>,
    pub accepts_custom_orders: Option<bool>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u32>,
    pub products_count: Option<u32>,
}

impl ArtisanRow {
    /// Map the row into an [`Artisan`], defaulting nullable columns.
    ///
    /// Users without a profile are not artisans and yield `None`.
    pub fn into_artisan(self) -> Option<Artisan> {
        let profile = self.artisan_profiles?;
        let crafts = match profile.crafts {
            Some(crafts) if !crafts.is_empty() => crafts,
            _ => DEFAULT_CRAFTS.iter().map(|c| c.to_string()).collect(),
        };

        Some(Artisan {
            id: ItemId::Str(self.id),
            name: self.name,
            avatar: Some(
                self.avatar_url
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| AVATAR_PLACEHOLDER.to_string()),
            ),
            location: profile
                .location
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            rating: profile.rating.filter(|r| r.is_finite()).unwrap_or(0.0),
            reviews: profile.reviews_count.unwrap_or(0),
            crafts,
            products_count: profile.products_count.unwrap_or(0),
            years_experience: profile.years_experience.unwrap_or(0),
            featured: profile.featured.unwrap_or(false),
            accepts_custom_orders: profile.accepts_custom_orders.unwrap_or(false),
            bio: Some(
                profile
                    .bio
                    .filter(|b| !b.is_empty())
                    .unwrap_or_else(|| DEFAULT_BIO.to_string()),
            ),
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
