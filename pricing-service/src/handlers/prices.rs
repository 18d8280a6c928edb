use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::offers::{format_answer, top_offer_from, ItemOffers};
use crate::services::{Marketplace, SearchError};
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct BestPricesRequest {
    /// Shopping list, e.g. `["Coffee", "Sugar"]`.
    #[serde(default)]
    #[validate(length(max = 25, message = "At most 25 items per request"))]
    pub items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BestPricesResponse {
    pub answer: String,
    pub prices: Vec<ItemOffers>,
}

fn map_search_error(err: SearchError) -> AppError {
    match err {
        SearchError::RateLimited => {
            AppError::TooManyRequests("Upstream search API rate limited".to_string(), None)
        }
        SearchError::NotConfigured(_) => AppError::ServiceUnavailable,
        SearchError::ApiError(msg) | SearchError::NetworkError(msg) => AppError::BadGateway(msg),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn best_prices(
    State(state): State<AppState>,
    Json(request): Json<BestPricesRequest>,
) -> Result<Json<BestPricesResponse>, AppError> {
    request.validate()?;

    let mut results = Vec::with_capacity(request.items.len());

    for name in &request.items {
        let query = name.trim();
        if query.is_empty() {
            continue;
        }

        // Both marketplaces in parallel, items one after another.
        let (walmart_data, amazon_data) = tokio::try_join!(
            state.search.search(Marketplace::Walmart, query),
            state.search.search(Marketplace::Amazon, query),
        )
        .map_err(|e| {
            tracing::error!(item = %query, error = %e, "Marketplace search failed");
            map_search_error(e)
        })?;

        let offers: Vec<_> = [
            top_offer_from(Marketplace::Walmart.label(), &walmart_data),
            top_offer_from(Marketplace::Amazon.label(), &amazon_data),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::debug!(item = %query, offer_count = offers.len(), "Extracted offers");

        results.push(ItemOffers {
            item: name.clone(),
            offers,
        });
    }

    let answer = format_answer(&results);

    Ok(Json(BestPricesResponse {
        answer,
        prices: results,
    }))
}
