//! Marketplace search abstractions and implementations.
//!
//! This module provides a trait-based abstraction over product search
//! backends, allowing easy swapping between ScrapingBee and a mock.

pub mod metrics;
pub mod scrapingbee;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

pub use scrapingbee::ScrapingBeeClient;

/// Error type for search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search provider not configured: {0}")]
    NotConfigured(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Marketplaces the service can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marketplace {
    Walmart,
    Amazon,
}

impl Marketplace {
    /// Human-readable source label used in offers and answers.
    pub fn label(&self) -> &'static str {
        match self {
            Marketplace::Walmart => "Walmart",
            Marketplace::Amazon => "Amazon",
        }
    }

    /// Search endpoint path segment on the ScrapingBee API.
    pub fn search_path(&self) -> &'static str {
        match self {
            Marketplace::Walmart => "walmart/search",
            Marketplace::Amazon => "amazon/search",
        }
    }
}

/// Trait for product search providers.
///
/// The response shape is deliberately untyped: the upstream APIs are
/// undocumented and unstable, and offer extraction is heuristic.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Run a search for `query` on the given marketplace.
    async fn search(&self, marketplace: Marketplace, query: &str) -> Result<Value, SearchError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), SearchError>;
}

/// Mock search provider used when no API key is configured and in tests.
pub struct MockSearchProvider {
    enabled: bool,
}

impl MockSearchProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn sample_price(marketplace: Marketplace, query: &str) -> f64 {
        let base = match query.to_lowercase().as_str() {
            "coffee" => 8.49,
            "sugar" => 3.29,
            "flour" => 2.99,
            "olive oil" => 11.99,
            _ => 9.99,
        };
        match marketplace {
            Marketplace::Walmart => base,
            Marketplace::Amazon => base + 0.50,
        }
    }
}

#[async_trait]
impl ProductSearch for MockSearchProvider {
    async fn search(&self, marketplace: Marketplace, query: &str) -> Result<Value, SearchError> {
        if !self.enabled {
            return Err(SearchError::NotConfigured(
                "Mock search provider not enabled".to_string(),
            ));
        }

        metrics::record_lookup(marketplace.label(), "ok");

        Ok(json!({
            "items": [
                {
                    "title": format!("{} (sample listing)", query),
                    "price": Self::sample_price(marketplace, query),
                    "currency": "USD",
                }
            ]
        }))
    }

    async fn health_check(&self) -> Result<(), SearchError> {
        if self.enabled {
            Ok(())
        } else {
            Err(SearchError::NotConfigured(
                "Mock search provider not enabled".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_one_item_per_marketplace() {
        let provider = MockSearchProvider::new(true);
        let data = provider
            .search(Marketplace::Walmart, "Coffee")
            .await
            .unwrap();
        let items = data["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["currency"], "USD");
    }

    #[tokio::test]
    async fn amazon_sample_costs_more_than_walmart() {
        let walmart = MockSearchProvider::sample_price(Marketplace::Walmart, "Sugar");
        let amazon = MockSearchProvider::sample_price(Marketplace::Amazon, "Sugar");
        assert!(amazon > walmart);
    }

    #[tokio::test]
    async fn disabled_mock_reports_not_configured() {
        let provider = MockSearchProvider::new(false);
        let err = provider
            .search(Marketplace::Amazon, "Coffee")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NotConfigured(_)));
    }
}
