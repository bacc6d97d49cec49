//! Product recommendation capability.
//!
//! Defines the `RecommendationProvider` trait the gateway calls for
//! `/recommendations`-style requests. The bundled [`NoRecommendations`]
//! provider always answers with an empty list; a catalogue- or model-backed
//! provider can be injected in its place.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::intent::category::Category;

/// What the storefront asks recommendations for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Free-form bounds such as `{"min": 10.0, "max": 50.0}`.
    #[serde(default)]
    pub price_range: Option<HashMap<String, f64>>,
    /// Maximum number of items; the configured default applies when absent.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A single recommended product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    pub product_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub score: f32,
}

/// Recommendation list as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ProductRecommendation>,
    pub count: usize,
}

impl RecommendationResponse {
    pub fn new(recommendations: Vec<ProductRecommendation>) -> Self {
        let count = recommendations.len();
        Self {
            recommendations,
            count,
        }
    }
}

/// Trait for recommendation backends.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Produce recommendations for `request`. May return more than the
    /// requested limit; the gateway truncates.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> anyhow::Result<Vec<ProductRecommendation>>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Provider that never recommends anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecommendations;

#[async_trait]
impl RecommendationProvider for NoRecommendations {
    async fn recommend(
        &self,
        _request: &RecommendationRequest,
    ) -> anyhow::Result<Vec<ProductRecommendation>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}
