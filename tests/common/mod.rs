//! Helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use pricetrack::db::{DbPool, establish_connection_pool, run_migrations};
use pricetrack::domain::product::{AnalyzedProduct, DealStatus, PricePoint};
use pricetrack::gateway::{GatewayResult, ProductAnalyzer};

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// `days` daily points ending today, oldest first.
pub fn daily_history(days: u64, start_price: f64) -> Vec<PricePoint> {
    let today = Utc::now().date_naive();
    (0..days)
        .map(|offset| {
            let date = today
                .checked_sub_days(Days::new(days - 1 - offset))
                .unwrap_or(NaiveDate::MIN);
            PricePoint::new(date, start_price - offset as f64)
        })
        .collect()
}

pub fn analyzed(title: &str, days: u64) -> AnalyzedProduct {
    let history = daily_history(days, 399.0);
    let current_price = history.last().map(|point| point.price).unwrap_or(399.0);
    AnalyzedProduct {
        title: title.to_string(),
        category: "Electronics".to_string(),
        current_price,
        original_price: 399.0,
        currency: "$".to_string(),
        image: "https://example.com/item.jpg".to_string(),
        description: "Wireless noise cancelling headphones.".to_string(),
        history,
        rating: 4.7,
        review_count: 2048,
        deal_status: DealStatus::Great,
        advice: "Buy now, the price is at a monthly low.".to_string(),
    }
}

/// Analyzer answering every query with a 30-day product named after it.
pub struct FakeAnalyzer;

#[async_trait]
impl ProductAnalyzer for FakeAnalyzer {
    async fn analyze(&self, query: &str) -> GatewayResult<AnalyzedProduct> {
        Ok(analyzed(query, 30))
    }
}
