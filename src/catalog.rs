use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    HomeGarden,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: Category,
    pub stock: u32,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}

/// The hardcoded demo catalog. The live listing merges this with the
/// vector-search source when one is configured.
pub fn demo_catalog() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        description: &str,
        price: f64,
        category: Category,
        stock: u32,
        featured: bool,
    ) -> Product {
        Product {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            image: format!("/products/{}.jpg", id),
            category,
            stock,
            featured,
            rating: Some(4.0),
            reviews: Some(12),
        }
    }

    vec![
        product(
            "elec-001",
            "Wireless Headphones",
            "Over-ear headphones with active noise cancellation and 30h battery.",
            129.99,
            Category::Electronics,
            42,
            true,
        ),
        product(
            "elec-002",
            "Mechanical Keyboard",
            "Tenkeyless board with hot-swappable switches.",
            89.0,
            Category::Electronics,
            17,
            false,
        ),
        product(
            "cloth-001",
            "Linen Shirt",
            "Relaxed-fit linen shirt, garment dyed.",
            49.5,
            Category::Clothing,
            80,
            true,
        ),
        product(
            "cloth-002",
            "Wool Beanie",
            "Merino wool beanie, one size.",
            19.99,
            Category::Clothing,
            120,
            false,
        ),
        product(
            "book-001",
            "The Field Guide to Espresso",
            "Dialing in, cupping notes and roast profiles.",
            24.0,
            Category::Books,
            35,
            false,
        ),
        product(
            "book-002",
            "Gardens of the Pacific Northwest",
            "A photographic tour of fifty gardens.",
            39.95,
            Category::Books,
            9,
            false,
        ),
        product(
            "home-001",
            "Cast Iron Dutch Oven",
            "5.5 quart enameled dutch oven.",
            74.99,
            Category::HomeGarden,
            22,
            true,
        ),
        product(
            "home-002",
            "Ceramic Planter Set",
            "Set of three glazed planters with drainage.",
            32.5,
            Category::HomeGarden,
            54,
            false,
        ),
    ]
}

/// Merge the hardcoded catalog with externally sourced products, then apply
/// the optional category and free-text filters. Filter semantics follow the
/// storefront listing: category equality, case-insensitive substring match
/// on name or description.
pub fn merge_and_filter(
    base: Vec<Product>,
    extra: Vec<Product>,
    category: Option<Category>,
    search: Option<&str>,
) -> Vec<Product> {
    let mut products = base;
    products.extend(extra);

    if let Some(category) = category {
        products.retain(|p| p.category == category);
    }

    if let Some(search) = search.filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        products.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        });
    }

    products
}
