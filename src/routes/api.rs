use actix_web::{HttpResponse, Responder, get, web};

use crate::AppTracker;
use crate::services::{ServiceError, products};

#[get("/v1/products")]
/// Return every tracked product, most recently added first.
pub async fn api_v1_products(tracker: web::Data<AppTracker>) -> impl Responder {
    HttpResponse::Ok().json(tracker.list())
}

#[get("/v1/products/{product_id}")]
/// Return one tracked product or `404 Not Found`.
pub async fn api_v1_product(
    product_id: web::Path<String>,
    tracker: web::Data<AppTracker>,
) -> impl Responder {
    match products::get_product(tracker.get_ref(), &product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
