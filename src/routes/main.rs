use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::AppTracker;
use crate::routes::{base_context, redirect, render_template};
use crate::services::products;

#[get("/")]
pub async fn show_index(
    tracker: web::Data<AppTracker>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = products::load_dashboard(tracker.get_ref());

    let mut context = base_context(&flash_messages, "index");
    context.insert("products", &data.products);
    context.insert("summary", &data.summary);
    render_template(&tera, "main/index.html", &context)
}

#[post("/refresh")]
pub async fn refresh() -> impl Responder {
    FlashMessage::info(products::refresh_products()).send();
    redirect("/")
}
