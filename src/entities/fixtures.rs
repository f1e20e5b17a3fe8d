//! Bundled storefront fixtures
//!
//! Six curated products and artisans, padded with generated entries so the
//! listing pages have more than one page to show.

use crate::core::field::ItemId;
use crate::entities::artisan::Artisan;
use crate::entities::product::{ArtisanRef, PRODUCT_PLACEHOLDER, Product};

/// Category labels in display order
pub const CATEGORIES: [&str; 6] = [
    "Textiles",
    "Wood Carving",
    "Jewelry",
    "Basketry",
    "Pottery",
    "Metalwork",
];

/// Locations offered by the artisan location filter
pub const LOCATIONS: [&str; 4] = ["Antananarivo", "Fianarantsoa", "Toamasina", "Antsirabe"];

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    category: &str,
    price: f64,
    artisan: (&str, &str),
    rating: f64,
    reviews: u32,
    materials: &[&str],
    in_stock: bool,
) -> Product {
    Product {
        id: ItemId::Int(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        original_price: None,
        images: vec![PRODUCT_PLACEHOLDER.to_string()],
        artisan: ArtisanRef {
            name: artisan.0.to_string(),
            location: artisan.1.to_string(),
        },
        rating,
        reviews,
        is_new: false,
        is_featured: false,
        materials: materials.iter().map(|m| m.to_string()).collect(),
        in_stock,
        stock_quantity: None,
    }
}

/// The full bundled product collection (18 items)
pub fn products() -> Vec<Product> {
    let mut items = vec![
        Product {
            original_price: Some(95000.0),
            is_new: true,
            ..product(
                1,
                "Hand-woven Silk Lamba",
                "Textiles",
                85000.0,
                ("Marie Razafy", "Antananarivo"),
                4.8,
                24,
                &["Silk", "Natural dyes"],
                true,
            )
        },
        Product {
            is_featured: true,
            ..product(
                2,
                "Carved Rosewood Sculpture",
                "Wood Carving",
                150000.0,
                ("Jean Rakotomalala", "Fianarantsoa"),
                4.9,
                18,
                &["Rosewood"],
                true,
            )
        },
        product(
            3,
            "Silver Filigree Necklace",
            "Jewelry",
            65000.0,
            ("Sophie Andriamihaja", "Antananarivo"),
            4.7,
            31,
            &["Sterling Silver"],
            true,
        ),
        Product {
            is_new: true,
            ..product(
                4,
                "Raffia Storage Basket",
                "Basketry",
                45000.0,
                ("Rasoa Raharimampionona", "Toamasina"),
                4.6,
                15,
                &["Raffia Palm"],
                false,
            )
        },
        product(
            5,
            "Traditional Clay Pot",
            "Pottery",
            35000.0,
            ("Hery Randriamanantsoa", "Antsirabe"),
            4.5,
            12,
            &["Clay", "Natural glazes"],
            true,
        ),
        product(
            6,
            "Forged Iron Candle Holder",
            "Metalwork",
            55000.0,
            ("Paul Rakotonirina", "Antananarivo"),
            4.4,
            8,
            &["Iron"],
            true,
        ),
    ];

    let makers = ["Rasoa", "Hery", "Jean", "Marie", "Voahangy", "Paul"];
    let materials = ["Natural dyes", "Silk", "Cotton", "Clay", "Iron", "Rosewood"];
    items.extend((0..12usize).map(|i| Product {
        is_new: i % 4 == 0,
        is_featured: i % 5 == 0,
        ..product(
            7 + i as i64,
            &format!("Artisan Craft {}", i + 1),
            CATEGORIES[i % 6],
            30000.0 + (i % 12) as f64 * 5000.0,
            (makers[i % 6], LOCATIONS[i % 4]),
            4.0 + (i % 10) as f64 / 10.0,
            5 + (i % 50) as u32,
            &materials[..1 + i % 3],
            i % 7 != 0,
        )
    }));
    items
}

#[allow(clippy::too_many_arguments)]
fn artisan(
    id: i64,
    name: &str,
    location: &str,
    rating: f64,
    reviews: u32,
    crafts: &[&str],
    products_count: u32,
    years_experience: u32,
) -> Artisan {
    Artisan {
        id: ItemId::Int(id),
        name: name.to_string(),
        avatar: Some("/placeholder.svg?height=80&width=80".to_string()),
        location: location.to_string(),
        rating,
        reviews,
        crafts: crafts.iter().map(|c| c.to_string()).collect(),
        products_count,
        years_experience,
        featured: false,
        accepts_custom_orders: false,
        bio: None,
        email: None,
        created_at: None,
        updated_at: None,
    }
}

/// The full bundled artisan collection (30 items)
pub fn artisans() -> Vec<Artisan> {
    let mut items = vec![
        Artisan {
            featured: true,
            accepts_custom_orders: true,
            bio: Some(
                "Master weaver specializing in traditional Malagasy silk lamba using natural dyes."
                    .to_string(),
            ),
            ..artisan(
                1,
                "Marie Razafy",
                "Antananarivo",
                4.9,
                124,
                &["Textiles", "Weaving", "Natural Dyes"],
                23,
                15,
            )
        },
        Artisan {
            featured: true,
            bio: Some(
                "Traditional rosewood sculptor blending ancestral symbolism with modern forms."
                    .to_string(),
            ),
            ..artisan(
                2,
                "Jean Rakotomalala",
                "Fianarantsoa",
                4.8,
                98,
                &["Wood Carving", "Sculpture"],
                18,
                20,
            )
        },
        Artisan {
            accepts_custom_orders: true,
            bio: Some(
                "Filigree jewelry artist crafting contemporary pieces with traditional techniques."
                    .to_string(),
            ),
            ..artisan(
                3,
                "Sophie Andriamihaja",
                "Antananarivo",
                4.7,
                63,
                &["Jewelry", "Filigree"],
                12,
                9,
            )
        },
        Artisan {
            accepts_custom_orders: true,
            bio: Some(
                "Basketry specialist using sustainable raffia with regional patterns.".to_string(),
            ),
            ..artisan(
                4,
                "Rasoa Raharimampionona",
                "Toamasina",
                4.6,
                45,
                &["Basketry", "Weaving"],
                14,
                11,
            )
        },
        Artisan {
            bio: Some(
                "Potter crafting traditional and contemporary clay vessels with natural glazes."
                    .to_string(),
            ),
            ..artisan(
                5,
                "Hery Randriamanantsoa",
                "Antsirabe",
                4.5,
                52,
                &["Pottery", "Ceramics"],
                9,
                8,
            )
        },
        Artisan {
            accepts_custom_orders: true,
            bio: Some(
                "Blacksmith forging functional and decorative metal items using traditional methods."
                    .to_string(),
            ),
            ..artisan(
                6,
                "Paul Rakotonirina",
                "Antananarivo",
                4.4,
                28,
                &["Metalwork", "Blacksmithing"],
                7,
                12,
            )
        },
    ];

    let names = [
        "Hery Randriamanantsoa",
        "Paul Rakotonirina",
        "Sophie Andriamihaja",
        "Rasoa Raharimampionona",
    ];
    let locations = ["Antsirabe", "Antananarivo", "Toamasina", "Fianarantsoa"];
    let crafts: [&[&str]; 4] = [
        &["Pottery", "Clay"],
        &["Metalwork", "Forging"],
        &["Jewelry", "Filigree"],
        &["Basketry", "Weaving"],
    ];
    items.extend((0..24usize).map(|i| Artisan {
        avatar: None,
        featured: i % 7 == 0,
        accepts_custom_orders: i % 3 == 0,
        ..artisan(
            7 + i as i64,
            names[i % 4],
            locations[i % 4],
            4.0 + (i % 10) as f64 / 10.0,
            10 + (i % 80) as u32,
            crafts[i % 4],
            5 + (i % 40) as u32,
            3 + (i % 25) as u32,
        )
    }));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_sizes() {
        assert_eq!(products().len(), 18);
        assert_eq!(artisans().len(), 30);
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let ids: HashSet<_> = products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 18);
        let ids: HashSet<_> = artisans().into_iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_every_product_category_is_known() {
        assert!(
            products()
                .iter()
                .all(|p| CATEGORIES.contains(&p.category.as_str()))
        );
    }
}
