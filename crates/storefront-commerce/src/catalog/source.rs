//! Where the catalog comes from.

use async_trait::async_trait;
use storefront_data::FetchClient;

use crate::catalog::Product;
use crate::error::CommerceError;

/// Public demo catalog the storefront reads by default.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// A provider of the full product list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Retrieve every product, in the order the provider lists them.
    async fn fetch_all(&self) -> Result<Vec<Product>, CommerceError>;
}

/// Catalog served as a JSON array from a single HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: FetchClient,
    url: String,
}

impl HttpCatalogSource {
    /// Read the catalog from `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new(), url)
    }

    /// Read the catalog from `url` using `client`.
    pub fn with_client(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpCatalogSource {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, CommerceError> {
        let response = self
            .client
            .get(self.url.as_str())
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        let products: Vec<Product> = response.json()?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn start_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_all_parses_array_in_order() {
        let body = r#"[
            {"id": 3, "title": "Mens Cotton Jacket", "price": 55.99},
            {"id": 1, "title": "Backpack", "price": 109.95}
        ]"#;
        let app = Router::new().route("/products", get(move || async move { body }));
        let base = start_server(app).await;

        let source = HttpCatalogSource::new(format!("{}/products", base));
        let products = source.fetch_all().await.unwrap();

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::new(3), ProductId::new(1)]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let app = Router::new().route(
            "/products",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = start_server(app).await;

        let source = HttpCatalogSource::new(format!("{}/products", base));
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, CommerceError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_non_array_body_is_invalid_response() {
        let app = Router::new().route("/products", get(|| async { r#"{"error":"nope"}"# }));
        let base = start_server(app).await;

        let source = HttpCatalogSource::new(format!("{}/products", base));
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, CommerceError::InvalidResponse(_)));
    }

    #[test]
    fn test_default_url() {
        assert_eq!(HttpCatalogSource::default().url(), DEFAULT_CATALOG_URL);
    }
}
