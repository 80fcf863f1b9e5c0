use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::AppTracker;
use crate::forms::products::AddProductForm;
use crate::gateway::GeminiAnalyzer;
use crate::routes::{base_context, redirect, render_template};
use crate::services::in_flight::InFlightQueries;
use crate::services::products::ANALYSIS_FAILED_MESSAGE;
use crate::services::{ServiceError, products};

fn render_add_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    query: &str,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "add_product");
    context.insert("query", query);
    context.insert("error", &error);
    render_template(tera, "products/new.html", &context)
}

#[get("/products/new")]
pub async fn show_add_form(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_add_form(&tera, &flash_messages, "", None)
}

#[post("/products")]
pub async fn add_product(
    tracker: web::Data<AppTracker>,
    analyzer: web::Data<GeminiAnalyzer>,
    in_flight: web::Data<InFlightQueries>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    let query = form.query.clone();

    match products::add_product(
        tracker.get_ref(),
        analyzer.get_ref(),
        in_flight.get_ref(),
        form,
    )
    .await
    {
        Ok(outcome) => {
            FlashMessage::success(format!("Now tracking {}.", outcome.product.details.title))
                .send();
            if let Some(warning) = outcome.warning {
                FlashMessage::warning(warning).send();
            }
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            render_add_form(&tera, &flash_messages, &query, Some(message.as_str()))
        }
        Err(ServiceError::Busy) => render_add_form(
            &tera,
            &flash_messages,
            &query,
            Some("This product is already being analyzed. Please wait for it to finish."),
        ),
        Err(ServiceError::Analysis(_)) => {
            render_add_form(&tera, &flash_messages, &query, Some(ANALYSIS_FAILED_MESSAGE))
        }
        Err(err) => {
            log::error!("Failed to add a product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    tracker: web::Data<AppTracker>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_product_details(tracker.get_ref(), &product_id) {
        Ok(view) => {
            let mut context = base_context(&flash_messages, "product");
            context.insert("product", &view);
            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<String>,
    tracker: web::Data<AppTracker>,
) -> impl Responder {
    let outcome = products::delete_product(tracker.get_ref(), &product_id);
    FlashMessage::success(outcome.message).send();
    if let Some(warning) = outcome.warning {
        FlashMessage::warning(warning).send();
    }
    redirect("/")
}
