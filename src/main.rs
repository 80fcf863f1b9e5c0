use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use pricetrack::db::{establish_connection_pool, run_migrations};
use pricetrack::gateway::GeminiAnalyzer;
use pricetrack::models::config::{GeminiConfig, ServerConfig};
use pricetrack::repository::DieselRepository;
use pricetrack::routes::api::{api_v1_product, api_v1_products};
use pricetrack::routes::main::{refresh, show_index};
use pricetrack::routes::products::{add_product, delete_product, show_add_form, show_product};
use pricetrack::services::in_flight::InFlightQueries;
use pricetrack::tracker::ProductTracker;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let server_config = ServerConfig::from_env();

    let secret_key = match server_config
        .secret
        .as_deref()
        .map(|secret| Key::try_from(secret.as_bytes()))
    {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            log::warn!("SECRET_KEY is shorter than 64 bytes, using a generated key");
            Key::generate()
        }
        None => Key::generate(),
    };

    let gemini_config = match GeminiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let analyzer = match GeminiAnalyzer::new(gemini_config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            log::error!("Failed to build the analysis client: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let tracker = match ProductTracker::load(DieselRepository::new(pool)) {
        Ok(tracker) => web::Data::new(tracker),
        Err(e) => {
            log::error!("Failed to load tracked products: {e}");
            std::process::exit(1);
        }
    };
    let analyzer = web::Data::new(analyzer);
    let in_flight = web::Data::new(InFlightQueries::new());

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let address = server_config.address.clone();
    let port = server_config.port;
    log::info!("Listening on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(web::scope("/api").service(api_v1_products).service(api_v1_product))
            .service(show_index)
            .service(refresh)
            // `/products/new` must be registered before `/products/{product_id}`.
            .service(show_add_form)
            .service(add_product)
            .service(show_product)
            .service(delete_product)
            .app_data(web::Data::new(tera.clone()))
            .app_data(tracker.clone())
            .app_data(analyzer.clone())
            .app_data(in_flight.clone())
    })
    .bind((address, port))?
    .run()
    .await
}
