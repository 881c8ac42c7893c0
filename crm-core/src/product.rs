//! Products synced from WooCommerce.
//!
//! `WooProduct` mirrors the parts of the WooCommerce REST payload we read;
//! `Product` is the reshaped record served to clients and searched locally.

use serde::{Deserialize, Serialize};

/// Reshaped product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub categories: Vec<String>,
    pub status: String,
    /// URL of the first product image
    pub image: Option<String>,
}

/// Product as returned by `GET /wp-json/wc/v3/products`
#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub categories: Vec<WooCategory>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub images: Vec<WooImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooCategory {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooImage {
    pub src: String,
}

impl From<WooProduct> for Product {
    fn from(woo: WooProduct) -> Self {
        Product {
            id: woo.id,
            name: woo.name,
            sku: woo.sku,
            price: woo.price,
            categories: woo.categories.into_iter().map(|c| c.name).collect(),
            status: woo.status,
            image: woo.images.into_iter().next().map(|i| i.src),
        }
    }
}

/// Client-side product search. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Substring of the name or SKU
    pub query: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let query_ok = match non_empty(&self.query) {
            Some(q) => {
                let q = q.to_lowercase();
                product.name.to_lowercase().contains(&q) || product.sku.to_lowercase().contains(&q)
            }
            None => true,
        };

        let category_ok = non_empty(&self.category)
            .is_none_or(|c| product.categories.iter().any(|pc| pc.eq_ignore_ascii_case(c)));

        let status_ok = non_empty(&self.status).is_none_or(|s| product.status.eq_ignore_ascii_case(s));

        query_ok && category_ok && status_ok
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
