//! Product sync endpoint

use axum::{Json, Router, extract::State, routing::get};
use crm_core::product::Product;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/sync-products", get(sync_products).post(sync_products))
}

/// GET|POST /sync-products - Fetch products from WooCommerce, reshaped.
/// Every failure answers 400 with a JSON error body.
async fn sync_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let client = state.woo_client().map_err(AppError::bad_request)?;
    let products = client.fetch_products().await.map_err(AppError::bad_request)?;

    tracing::info!(count = products.len(), "synced products");
    Ok(Json(products))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use crm_core::config::WooCredentials;
    use mockito::{Matcher, Server};

    use crate::routes::test_support::{json_body, send, state};

    fn request(method: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/sync-products")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_sync_returns_reshaped_products() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/wp-json/wc/v3/products")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "name": "Mixer", "sku": "MX", "price": "10", "status": "publish", "categories": [], "images": []}]"#)
            .expect(2)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let url = server.url();
        let state = state(&dir, |c| {
            c.woocommerce = Some(WooCredentials {
                base_url: url,
                consumer_key: "ck".into(),
                consumer_secret: "cs".into(),
            })
        });

        for method in ["GET", "POST"] {
            let response = send(state.clone(), request(method)).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body[0]["name"], "Mixer");
            assert_eq!(body[0]["image"], serde_json::Value::Null);
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_answer_400() {
        let dir = tempfile::tempdir().unwrap();
        let response = send(state(&dir, |_| {}), request("GET")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("WooCommerce credentials"));
    }

    #[tokio::test]
    async fn test_upstream_failure_answers_400() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/wp-json/wc/v3/products")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let url = server.url();
        let state = state(&dir, |c| {
            c.woocommerce = Some(WooCredentials {
                base_url: url,
                consumer_key: "ck".into(),
                consumer_secret: "cs".into(),
            })
        });

        let response = send(state, request("POST")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].as_str().unwrap().contains("503"));
    }
}
