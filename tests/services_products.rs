use pricetrack::domain::product::DealStatus;
use pricetrack::forms::products::AddProductForm;
use pricetrack::repository::{DieselRepository, ProductStore};
use pricetrack::services::in_flight::InFlightQueries;
use pricetrack::services::products;
use pricetrack::tracker::ProductTracker;

mod common;

#[actix_web::test]
async fn add_product_tracks_and_persists_analyzed_product() {
    let test_db = common::TestDb::new("service_add_product_persists.db");
    let repo = DieselRepository::new(test_db.pool());
    let tracker = ProductTracker::load(repo.clone()).expect("tracker should load");

    let outcome = products::add_product(
        &tracker,
        &common::FakeAnalyzer,
        &InFlightQueries::new(),
        AddProductForm::new("Sony Headphones"),
    )
    .await
    .expect("expected product to be tracked");

    assert!(outcome.warning.is_none());
    assert_eq!(outcome.product.details.history.len(), 30);
    assert!(matches!(
        outcome.product.details.deal_status,
        DealStatus::Great | DealStatus::Good | DealStatus::Fair | DealStatus::Bad
    ));

    let listed = tracker.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], outcome.product);

    let stored = repo.load_products().expect("load stored products");
    assert_eq!(stored, listed);
}

#[actix_web::test]
async fn delete_product_removes_from_store() {
    let test_db = common::TestDb::new("service_delete_product_removes.db");
    let repo = DieselRepository::new(test_db.pool());
    let tracker = ProductTracker::load(repo.clone()).expect("tracker should load");
    let in_flight = InFlightQueries::new();

    let first = products::add_product(
        &tracker,
        &common::FakeAnalyzer,
        &in_flight,
        AddProductForm::new("Kettle"),
    )
    .await
    .expect("first product");
    let second = products::add_product(
        &tracker,
        &common::FakeAnalyzer,
        &in_flight,
        AddProductForm::new("Toaster"),
    )
    .await
    .expect("second product");

    let outcome = products::delete_product(&tracker, &first.product.id);
    assert_eq!(outcome.message, "Stopped tracking Kettle.");

    let stored = repo.load_products().expect("load stored products");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, second.product.id);

    let dashboard = products::load_dashboard(&tracker);
    assert_eq!(dashboard.summary, "Tracking 1 product.");
    assert_eq!(dashboard.products[0].title, "Toaster");
}
