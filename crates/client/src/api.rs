//! Backend services consumed by the listing, and their HTTP implementation.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use storefront_catalog::{Category, FilterRequest, Product};

use crate::config::ClientConfig;

pub const CATEGORIES_PATH: &str = "api/v1/category/get-category";
pub const PRODUCT_LIST_PATH: &str = "api/v1/product/product-list";
pub const PRODUCT_COUNT_PATH: &str = "api/v1/product/product-count";
pub const PRODUCT_FILTERS_PATH: &str = "api/v1/product/product-filters";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid URL: {0}")]
    Url(String),
}

/// `GET /api/v1/category/get-category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    #[serde(default)]
    pub category: Vec<Category>,
}

/// Product list pages and filter results share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// `GET /api/v1/product/product-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCountResponse {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

/// Source of product categories.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn categories(&self) -> Result<CategoriesResponse, ClientError>;
}

/// Source of product pages, counts and filtered result sets.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// One page of the unfiltered list. Pages start at 1.
    async fn product_page(&self, page: u32) -> Result<Vec<Product>, ClientError>;

    async fn product_count(&self) -> Result<u64, ClientError>;

    async fn filter_products(&self, request: &FilterRequest) -> Result<Vec<Product>, ClientError>;

    /// Where the product's image can be fetched. Referenced only, never downloaded here.
    fn image_url(&self, product: &Product) -> String;
}

/// `reqwest`-backed client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self::with_client(http, config.api_url.clone()))
    }

    /// Build from an existing `reqwest::Client` (shared connection pool).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Url(format!("{path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(resp).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        return Err(ClientError::Api(status, resp.text().await.unwrap_or_default()));
    }

    resp.json().await.map_err(|e| ClientError::Parse(e.to_string()))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl CategoryService for HttpCatalogClient {
    async fn categories(&self) -> Result<CategoriesResponse, ClientError> {
        self.get_json(CATEGORIES_PATH).await
    }
}

#[async_trait]
impl ProductService for HttpCatalogClient {
    async fn product_page(&self, page: u32) -> Result<Vec<Product>, ClientError> {
        let resp: ProductsResponse = self
            .get_json(&format!("{PRODUCT_LIST_PATH}/{page}"))
            .await?;
        Ok(resp.products)
    }

    async fn product_count(&self) -> Result<u64, ClientError> {
        let resp: ProductCountResponse = self.get_json(PRODUCT_COUNT_PATH).await?;
        Ok(resp.total_count)
    }

    async fn filter_products(&self, request: &FilterRequest) -> Result<Vec<Product>, ClientError> {
        let resp: ProductsResponse = self.post_json(PRODUCT_FILTERS_PATH, request).await?;
        Ok(resp.products)
    }

    fn image_url(&self, product: &Product) -> String {
        let path = product.image_path();
        match self.endpoint(&path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{path}", self.base_url),
        }
    }
}
