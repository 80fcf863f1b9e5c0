use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::product::{DealStatus, Product};
use crate::domain::trend::{PriceRange, PriceTrend, price_range, price_trend};
use crate::forms::products::AddProductForm;
use crate::gateway::ProductAnalyzer;
use crate::repository::ProductStore;
use crate::services::in_flight::InFlightQueries;
use crate::services::{ServiceError, ServiceResult};
use crate::tracker::{Persistence, ProductTracker};

/// Message shown when the gateway could not produce a product.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Could not find or analyze this product. \
     Please try a different name or check your connection.";

const SAVE_FAILED_MESSAGE: &str =
    "Your change is shown but could not be saved; it may be lost after a restart.";

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub products: Vec<ProductCardView>,
    /// Line describing how many products are tracked.
    pub summary: String,
}

/// Card shown for each product on the dashboard grid.
#[derive(Debug, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub currency: String,
    pub current_price: f64,
    pub original_price: f64,
    /// Whether the list price is above the current price.
    pub has_discount: bool,
    pub rating: f64,
    pub review_count: u64,
    pub deal_status: DealStatus,
    pub trend: PriceTrend,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let details = &product.details;
        Self {
            id: product.id.clone(),
            title: details.title.clone(),
            category: details.category.clone(),
            image: details.image.clone(),
            currency: details.currency.clone(),
            current_price: details.current_price,
            original_price: details.original_price,
            has_discount: details.original_price > details.current_price,
            rating: details.rating,
            review_count: details.review_count,
            deal_status: details.deal_status,
            trend: price_trend(details.current_price, &details.history),
        }
    }
}

/// One point of the price-history chart.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChartPoint {
    /// Short axis label such as `Mar 5`.
    pub label: String,
    pub date: NaiveDate,
    pub price: f64,
}

/// Data required to render a single product with its history.
#[derive(Debug, Serialize)]
pub struct ProductDetailsView {
    pub card: ProductCardView,
    pub description: String,
    pub advice: String,
    pub added_at: DateTime<Utc>,
    pub range: Option<PriceRange>,
    pub chart: Vec<ChartPoint>,
}

impl From<&Product> for ProductDetailsView {
    fn from(product: &Product) -> Self {
        let details = &product.details;
        let chart = details
            .history
            .iter()
            .map(|point| ChartPoint {
                label: point.date.format("%b %-d").to_string(),
                date: point.date,
                price: point.price,
            })
            .collect();

        Self {
            card: ProductCardView::from(product),
            description: details.description.clone(),
            advice: details.advice.clone(),
            added_at: product.added_at,
            range: price_range(&details.history),
            chart,
        }
    }
}

/// Result of tracking a new product.
#[derive(Debug)]
pub struct AddProductOutcome {
    pub product: Product,
    /// Set when the product is tracked but could not be saved.
    pub warning: Option<String>,
}

/// Result of removing a product.
#[derive(Debug)]
pub struct DeleteProductOutcome {
    pub message: String,
    pub warning: Option<String>,
}

/// Dashboard summary line for `count` tracked products.
pub fn tracking_summary(count: usize) -> String {
    match count {
        0 => "You aren't tracking any products yet.".to_string(),
        1 => "Tracking 1 product.".to_string(),
        n => format!("Tracking {n} products."),
    }
}

/// Loads the dashboard grid.
pub fn load_dashboard<S>(tracker: &ProductTracker<S>) -> DashboardData
where
    S: ProductStore,
{
    let products: Vec<ProductCardView> = tracker.list().iter().map(ProductCardView::from).collect();
    DashboardData {
        summary: tracking_summary(products.len()),
        products,
    }
}

/// Loads a single product for the detail view.
pub fn load_product_details<S>(
    tracker: &ProductTracker<S>,
    product_id: &str,
) -> ServiceResult<ProductDetailsView>
where
    S: ProductStore,
{
    tracker
        .get(product_id)
        .map(|product| ProductDetailsView::from(&product))
        .ok_or(ServiceError::NotFound)
}

/// Loads a single tracked product record.
pub fn get_product<S>(tracker: &ProductTracker<S>, product_id: &str) -> ServiceResult<Product>
where
    S: ProductStore,
{
    tracker.get(product_id).ok_or(ServiceError::NotFound)
}

/// Analyzes the submitted query and tracks the resulting product.
///
/// Nothing is tracked when the analysis fails. A second submission of a
/// query whose analysis is still running is refused with
/// [`ServiceError::Busy`].
pub async fn add_product<S, A>(
    tracker: &ProductTracker<S>,
    analyzer: &A,
    in_flight: &InFlightQueries,
    form: AddProductForm,
) -> ServiceResult<AddProductOutcome>
where
    S: ProductStore,
    A: ProductAnalyzer + ?Sized,
{
    let query = form
        .into_query()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let _guard = in_flight.begin(&query).ok_or(ServiceError::Busy)?;

    let analyzed = analyzer.analyze(&query).await.map_err(|err| {
        log::error!("Failed to analyze product: {err}");
        ServiceError::from(err)
    })?;

    let product = Product::track(analyzed);
    let warning = warning_for(tracker.add(product.clone()));

    Ok(AddProductOutcome { product, warning })
}

/// Stops tracking a product. Unknown ids are not an error.
pub fn delete_product<S>(
    tracker: &ProductTracker<S>,
    product_id: &str,
) -> DeleteProductOutcome
where
    S: ProductStore,
{
    let removal = tracker.remove(product_id);
    let message = match &removal.removed {
        Some(product) => format!("Stopped tracking {}.", product.details.title),
        None => "Product was already removed.".to_string(),
    };

    DeleteProductOutcome {
        message,
        warning: warning_for(removal.persistence),
    }
}

/// Acknowledges a refresh request.
///
/// Prices are never re-analyzed in place, so there is nothing to refresh.
pub fn refresh_products() -> String {
    "Prices are updated when a product is added; there is nothing to refresh.".to_string()
}

fn warning_for(persistence: Persistence) -> Option<String> {
    persistence
        .is_failed()
        .then(|| SAVE_FAILED_MESSAGE.to_string())
}
