//! Product analysis backed by a hosted generative model.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::AnalyzedProduct;

pub mod gemini;

#[cfg(test)]
pub mod mock;

pub use gemini::GeminiAnalyzer;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Reasons an analysis produced no product.
///
/// Callers treat every variant the same way: the analysis failed and nothing
/// should be tracked.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway returned no content")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Turns a free-text product name or URL into product details.
#[async_trait]
pub trait ProductAnalyzer: Send + Sync {
    async fn analyze(&self, query: &str) -> GatewayResult<AnalyzedProduct>;
}
