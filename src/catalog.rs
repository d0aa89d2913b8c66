//! Product catalog and arrangement content tables
//!
//! The seed catalog mirrors the brand's launch line-up. Seed products carry
//! fixed ids so orders placed against them keep resolving across restarts.
//! Delisted products are excluded from every active view; lookup by id keeps
//! working so historical orders can still render their items.

use crate::domain::aggregates::product::{PriceRange, Product, ProductDraft};
use crate::domain::value_objects::Money;
use rust_decimal::Decimal;
use serde::Serialize;

pub const CATEGORY_ALL: &str = "All";

/// A palette a customer picks as the base mood of a custom arrangement.
#[derive(Clone, Debug, Serialize)]
pub struct ColorMood {
    pub name: &'static str,
    pub colors: &'static [&'static str],
    pub mood: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Flower {
    pub id: &'static str,
    pub name: &'static str,
    /// Months (1-12) the flower is available.
    pub seasonal: &'static [u8],
    pub allergy_tags: &'static [&'static str],
    pub image: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Fruit {
    pub id: &'static str,
    pub name: &'static str,
    pub seasonal: &'static [u8],
    pub image: &'static str,
}

pub const COLOR_MOODS: &[ColorMood] = &[
    ColorMood { name: "Soft Blush", colors: &["#ffe9e6", "#ffd1d1", "#ffb3ba"], mood: "Gentle and romantic" },
    ColorMood { name: "Warm Sunset", colors: &["#fd5a1e", "#ff5757", "#ff8c42"], mood: "Bold and energetic" },
    ColorMood { name: "Fresh Garden", colors: &["#2fb380", "#7fb069", "#a7c957"], mood: "Natural and refreshing" },
    ColorMood { name: "Monochrome", colors: &["#1f2328", "#a7a098", "#f7f6f4"], mood: "Elegant and timeless" },
    ColorMood { name: "Ocean Breeze", colors: &["#4a90e2", "#7bb3f0", "#a8d5f2"], mood: "Calm and serene" },
    ColorMood { name: "Golden Hour", colors: &["#f4d03f", "#f7dc6f", "#fbeaa7"], mood: "Warm and luxurious" },
];

const ALL_YEAR: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

pub const FLOWERS: &[Flower] = &[
    Flower { id: "roses", name: "Garden Roses", seasonal: ALL_YEAR, allergy_tags: &[], image: "https://images.pexels.com/photos/1128678/pexels-photo-1128678.jpeg?auto=compress&cs=tinysrgb&w=200" },
    Flower { id: "peonies", name: "Peonies", seasonal: &[4, 5, 6, 7], allergy_tags: &["pollen-sensitive"], image: "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=200" },
    Flower { id: "eucalyptus", name: "Eucalyptus", seasonal: ALL_YEAR, allergy_tags: &[], image: "https://images.pexels.com/photos/1132047/pexels-photo-1132047.jpeg?auto=compress&cs=tinysrgb&w=200" },
];

pub const FRUITS: &[Fruit] = &[
    Fruit { id: "strawberries", name: "Fresh Strawberries", seasonal: &[1, 2, 11, 12], image: "https://images.pexels.com/photos/89778/strawberries-frisch-ripe-sweet-89778.jpeg?auto=compress&cs=tinysrgb&w=200" },
    Fruit { id: "oranges", name: "Premium Oranges", seasonal: &[1, 2, 3, 4, 11, 12], image: "https://images.pexels.com/photos/161559/background-bitter-breakfast-bright-161559.jpeg?auto=compress&cs=tinysrgb&w=200" },
    Fruit { id: "apples", name: "Crisp Apples", seasonal: ALL_YEAR, image: "https://images.pexels.com/photos/102104/pexels-photo-102104.jpeg?auto=compress&cs=tinysrgb&w=200" },
];

pub const OCCASIONS: &[&str] = &[
    "Birthday", "Anniversary", "Wedding", "Graduation", "Get Well Soon",
    "Thank You", "Congratulations", "Valentine's Day", "Mother's Day",
    "Corporate Gift", "Housewarming", "Just Because",
];

pub fn fruit_by_id(id: &str) -> Option<&'static Fruit> {
    FRUITS.iter().find(|f| f.id == id)
}

pub fn flower_by_id(id: &str) -> Option<&'static Flower> {
    FLOWERS.iter().find(|f| f.id == id)
}

pub fn color_mood_by_name(name: &str) -> Option<&'static ColorMood> {
    COLOR_MOODS.iter().find(|m| m.name == name)
}

struct Seed {
    id: &'static str,
    title: &'static str,
    slug: &'static str,
    description: &'static str,
    images: [&'static str; 2],
    price: u32,
    range: (u32, u32),
    tags: [&'static str; 3],
    category: &'static str,
    is_express: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        title: "Sunset Garden Basket",
        slug: "sunset-garden-basket",
        description: "A vibrant collection of seasonal fruits with warm orange and yellow blooms",
        images: [
            "https://images.pexels.com/photos/1128678/pexels-photo-1128678.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 89,
        range: (69, 149),
        tags: ["bestseller", "romantic", "warm-tones"],
        category: "For Her",
        is_express: true,
    },
    Seed {
        id: "2",
        title: "Tropical Paradise Collection",
        slug: "tropical-paradise-collection",
        description: "Fresh tropical fruits with exotic blooms in coral and peach tones",
        images: [
            "https://images.pexels.com/photos/1132047/pexels-photo-1132047.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 129,
        range: (99, 199),
        tags: ["premium", "tropical", "exotic"],
        category: "Premium",
        is_express: false,
    },
    Seed {
        id: "3",
        title: "Elegant White & Green",
        slug: "elegant-white-green",
        description: "Sophisticated arrangement with white florals and fresh green accents",
        images: [
            "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1128678/pexels-photo-1128678.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 109,
        range: (89, 169),
        tags: ["elegant", "corporate", "clean"],
        category: "Corporate",
        is_express: true,
    },
    Seed {
        id: "4",
        title: "Berry Bliss Basket",
        slug: "berry-bliss-basket",
        description: "Sweet berry selection with delicate pink and purple blooms",
        images: [
            "https://images.pexels.com/photos/1132047/pexels-photo-1132047.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1128678/pexels-photo-1128678.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 79,
        range: (59, 129),
        tags: ["sweet", "berries", "delicate"],
        category: "Seasonal",
        is_express: true,
    },
    Seed {
        id: "5",
        title: "Royal Golden Harvest",
        slug: "royal-golden-harvest",
        description: "Premium golden fruits with luxury gold and burgundy florals",
        images: [
            "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1132047/pexels-photo-1132047.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 189,
        range: (149, 249),
        tags: ["luxury", "premium", "golden"],
        category: "Luxury",
        is_express: false,
    },
    Seed {
        id: "6",
        title: "Fresh Morning Bouquet",
        slug: "fresh-morning-bouquet",
        description: "Crisp morning selection with white and yellow seasonal blooms",
        images: [
            "https://images.pexels.com/photos/1128678/pexels-photo-1128678.jpeg?auto=compress&cs=tinysrgb&w=800",
            "https://images.pexels.com/photos/1435735/pexels-photo-1435735.jpeg?auto=compress&cs=tinysrgb&w=800",
        ],
        price: 99,
        range: (79, 149),
        tags: ["fresh", "morning", "bright"],
        category: "For Him",
        is_express: true,
    },
];

/// The launch catalog. Construction is infallible because the seed data is
/// known-good; a bad seed is a programming error.
pub fn seed_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|s| {
            let draft = ProductDraft {
                title: s.title.to_string(),
                slug: s.slug.to_string(),
                description: s.description.to_string(),
                images: s.images.iter().map(|i| i.to_string()).collect(),
                price: Money::myr(Decimal::from(s.price)),
                price_range: Some(PriceRange {
                    min: Money::myr(Decimal::from(s.range.0)),
                    max: Money::myr(Decimal::from(s.range.1)),
                }),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
                category: s.category.to_string(),
                is_express: s.is_express,
            };
            let mut product = Product::with_id(s.id, draft)
                .unwrap_or_else(|e| panic!("invalid seed product {}: {e}", s.id));
            product.take_events();
            product
        })
        .collect()
}

/// Active catalog view: delisted products never appear, whatever the filter.
pub fn filter_active<'a>(
    products: &'a [Product],
    category: &str,
    search: Option<&str>,
    express_only: bool,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| !p.is_delisted())
        .filter(|p| category == CATEGORY_ALL || p.category() == category)
        .filter(|p| {
            search.map_or(true, |q| {
                let q = q.to_lowercase();
                p.title().to_lowercase().contains(&q)
                    || p.description().to_lowercase().contains(&q)
                    || p.tags().iter().any(|t| t.to_lowercase().contains(&q))
            })
        })
        .filter(|p| !express_only || p.is_express())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_loads() {
        let products = seed_products();
        assert_eq!(products.len(), 6);
        assert!(products.iter().all(|p| !p.is_delisted()));
    }

    #[test]
    fn test_filter_by_category() {
        let products = seed_products();
        let premium = filter_active(&products, "Premium", None, false);
        assert_eq!(premium.len(), 1);
        assert_eq!(premium[0].slug(), "tropical-paradise-collection");
    }

    #[test]
    fn test_delisted_excluded_from_all_view() {
        let mut products = seed_products();
        products[0].delist();
        let all = filter_active(&products, CATEGORY_ALL, None, false);
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|p| p.id() != "1"));
        // Id lookup still resolves for historical order display.
        assert!(products.iter().any(|p| p.id() == "1"));
    }

    #[test]
    fn test_search_matches_tags() {
        let products = seed_products();
        let hits = filter_active(&products, CATEGORY_ALL, Some("luxury"), false);
        assert!(hits.iter().any(|p| p.slug() == "royal-golden-harvest"));
    }

    #[test]
    fn test_express_filter() {
        let products = seed_products();
        let express = filter_active(&products, CATEGORY_ALL, None, true);
        assert_eq!(express.len(), 4);
    }

    #[test]
    fn test_content_lookups() {
        assert!(fruit_by_id("strawberries").is_some());
        assert!(flower_by_id("peonies").unwrap().allergy_tags.contains(&"pollen-sensitive"));
        assert!(color_mood_by_name("Soft Blush").is_some());
        assert!(fruit_by_id("durian").is_none());
    }
}
