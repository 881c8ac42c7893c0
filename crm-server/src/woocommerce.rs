//! WooCommerce REST API client.

use anyhow::{Context, Result};
use crm_core::config::WooCredentials;
use crm_core::constants::WOO_PAGE_SIZE;
use crm_core::product::{Product, WooProduct};

const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

pub struct WooClient {
    http: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    pub fn from_credentials(creds: &WooCredentials) -> Result<Self> {
        creds.validate()?;

        Ok(WooClient {
            http: reqwest::Client::new(),
            base_url: creds.base_url.trim().trim_end_matches('/').to_string(),
            consumer_key: creds.consumer_key.clone(),
            consumer_secret: creds.consumer_secret.clone(),
        })
    }

    pub fn products_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCTS_PATH)
    }

    /// Fetch the first page of products and reshape them.
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let response = self
            .http
            .get(self.products_url())
            .query(&[("per_page", WOO_PAGE_SIZE)])
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("WooCommerce API error ({}): {}", status, error_text.trim());
        }

        let products: Vec<WooProduct> = response
            .json()
            .await
            .context("Failed to parse products from WooCommerce")?;

        tracing::debug!(count = products.len(), "fetched WooCommerce products");

        Ok(products.into_iter().map(Product::from).collect())
    }
}
