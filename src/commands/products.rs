use anyhow::{Context, Result};
use crm_core::config::CrmConfig;
use crm_core::product::{Product, ProductFilter};
use owo_colors::OwoColorize;
use serde::Deserialize;

use crate::render::Render;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub async fn run(
    config: &CrmConfig,
    search: Option<String>,
    category: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let products = fetch(&config.server_url).await?;

    let filter = ProductFilter {
        query: search,
        category,
        status,
    };
    let matches = filter.apply(&products);

    if matches.is_empty() {
        println!("{}", "No products found".dimmed());
        return Ok(());
    }

    for product in &matches {
        println!("{}", product.render());
    }
    println!(
        "{}",
        format!("  {} of {} products", matches.len(), products.len()).dimmed()
    );

    Ok(())
}

async fn fetch(server_url: &str) -> Result<Vec<Product>> {
    let url = format!("{}/sync-products", server_url.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach crm-server at {}", server_url))?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        anyhow::bail!("Product sync failed: {}", message);
    }

    response
        .json()
        .await
        .context("Failed to parse products from crm-server")
}
