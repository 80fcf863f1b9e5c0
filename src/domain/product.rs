use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Qualitative verdict on how favourable the current price is.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DealStatus {
    Great,
    Good,
    Fair,
    Bad,
}

impl DealStatus {
    /// Label shown next to the price, e.g. `Great`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Great => "Great",
            DealStatus::Good => "Good",
            DealStatus::Fair => "Fair",
            DealStatus::Bad => "Bad",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's observed price.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Validate)]
pub struct PricePoint {
    /// Calendar day of the observation, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Observed price in the product currency.
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Product details produced by the analysis gateway.
///
/// Everything a tracked [`Product`] carries except its identifier and the
/// moment tracking started.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedProduct {
    /// Short display title.
    #[validate(length(min = 1))]
    pub title: String,
    /// Free-text category such as `Electronics`.
    pub category: String,
    /// Price the product sells for today.
    #[validate(range(min = 0.0))]
    pub current_price: f64,
    /// List price or recent high point.
    #[validate(range(min = 0.0))]
    pub original_price: f64,
    /// Currency symbol used for display, e.g. `$`.
    pub currency: String,
    /// URL of the main product image.
    pub image: String,
    /// Short description of the product.
    pub description: String,
    /// Chronological price history, the last point being the most recent.
    #[validate(length(min = 1), custom(function = "validate_chronological"))]
    #[validate(nested)]
    pub history: Vec<PricePoint>,
    /// Average rating on a 0 to 5 scale.
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u64,
    /// Verdict on the current price.
    pub deal_status: DealStatus,
    /// Buy-now-or-wait advice.
    pub advice: String,
}

/// A product tracked on the dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique identifier assigned when tracking starts.
    pub id: String,
    /// Moment tracking started, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    /// Details returned by the analysis gateway.
    #[serde(flatten)]
    #[validate(nested)]
    pub details: AnalyzedProduct,
}

impl Product {
    /// Start tracking an analyzed product under a fresh identifier.
    pub fn track(details: AnalyzedProduct) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            // Persisted with millisecond precision; truncate so reloads compare equal.
            added_at: Utc::now().trunc_subsecs(3),
            details,
        }
    }
}

#[allow(clippy::ptr_arg)]
fn validate_chronological(history: &Vec<PricePoint>) -> Result<(), ValidationError> {
    let ordered = history
        .windows(2)
        .all(|pair| pair[0].date <= pair[1].date);
    if ordered {
        Ok(())
    } else {
        Err(ValidationError::new("chronological"))
    }
}
