//! Product entity

use crate::core::entity::{CatalogItem, Entity};
use crate::core::error::{CatalogError, CatalogResult};
use crate::core::field::{FieldValue, ItemId};
use crate::core::query::SortKey;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Image shown when a product has none
pub const PRODUCT_PLACEHOLDER: &str = "/placeholder.svg?height=300&width=400";

/// Maker credited on a product card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtisanRef {
    pub name: String,
    pub location: String,
}

/// A handcrafted product listed in the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub artisan: ArtisanRef,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub materials: Vec<String>,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

impl Product {
    /// First image, or the placeholder
    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PRODUCT_PLACEHOLDER)
    }

    /// Whether the product is shown with a strike-through original price
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

impl Entity for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn resource_name_singular() -> &'static str {
        "product"
    }

    fn id(&self) -> ItemId {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogItem for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.artisan.name.as_str(), self.category.as_str()];
        fields.extend(self.materials.iter().map(String::as_str));
        fields
    }

    fn matches_category(&self, label: &str) -> bool {
        self.category == label
    }

    fn location(&self) -> Option<&str> {
        Some(&self.artisan.location)
    }

    fn tags(&self) -> &[String] {
        &self.materials
    }

    fn range_value(&self) -> f64 {
        self.price
    }

    fn in_stock(&self) -> bool {
        self.in_stock
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "price" => Some(self.price.into()),
            "rating" => Some(self.rating.into()),
            "reviews" => Some(self.reviews.into()),
            "is_new" => Some(self.is_new.into()),
            "is_featured" => Some(self.is_featured.into()),
            "in_stock" => Some(self.in_stock.into()),
            _ => None,
        }
    }

    fn sort_keys() -> &'static [SortKey] {
        &[
            SortKey::Featured,
            SortKey::Rating,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Newest,
        ]
    }
}

/// Product submitted from the artisan dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1))]
    pub category: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub materials: Vec<String>,

    /// Units on hand; `None` means untracked
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl NewProduct {
    /// Validate the submission and turn it into a listed product
    pub fn into_product(self, id: ItemId, artisan: ArtisanRef) -> CatalogResult<Product> {
        self.validate()
            .map_err(|e| CatalogError::invalid_input("product", e))?;

        Ok(Product {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            price: self.price,
            original_price: None,
            images: self.images,
            artisan,
            rating: 0.0,
            reviews: 0,
            is_new: true,
            is_featured: false,
            materials: self
                .materials
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            in_stock: self.quantity != Some(0),
            stock_quantity: self.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maker() -> ArtisanRef {
        ArtisanRef {
            name: "Voahangy".to_string(),
            location: "Fianarantsoa".to_string(),
        }
    }

    fn submission() -> NewProduct {
        NewProduct {
            name: " Woven Raffia Hat ".to_string(),
            category: "Basketry".to_string(),
            price: 25000.0,
            images: Vec::new(),
            materials: vec!["Raffia Palm".to_string(), " ".to_string()],
            quantity: Some(4),
        }
    }

    #[test]
    fn test_new_product_is_listed_as_new() {
        let product = submission().into_product(ItemId::Int(19), maker()).unwrap();

        assert_eq!(product.name, "Woven Raffia Hat");
        assert!(product.is_new);
        assert!(product.in_stock);
        assert_eq!(product.materials, vec!["Raffia Palm"]);
        assert_eq!(product.cover_image(), PRODUCT_PLACEHOLDER);
    }

    #[test]
    fn test_zero_quantity_is_out_of_stock() {
        let product = NewProduct {
            quantity: Some(0),
            ..submission()
        }
        .into_product(ItemId::Int(20), maker())
        .unwrap();
        assert!(!product.in_stock);
    }

    #[test]
    fn test_invalid_submission_rejected() {
        let err = NewProduct {
            price: -1.0,
            ..submission()
        }
        .into_product(ItemId::Int(21), maker())
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = NewProduct {
            category: String::new(),
            ..submission()
        }
        .into_product(ItemId::Int(22), maker())
        .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_discount_and_sort_fields() {
        let mut product = submission().into_product(ItemId::Int(23), maker()).unwrap();
        assert!(!product.is_discounted());
        product.original_price = Some(30000.0);
        assert!(product.is_discounted());

        assert_eq!(product.field_value("price"), Some(FieldValue::Float(25000.0)));
        assert_eq!(product.field_value("unknown"), None);
        assert_eq!(product.location(), Some("Fianarantsoa"));
    }
}
