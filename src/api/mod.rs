use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::pipeline::ListingScraper;

pub mod handlers;
pub mod models;

pub fn create_router(scraper: Arc<ListingScraper>, static_dir: &Path) -> Router {
    // Open CORS so a client served from anywhere can call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/scrape", get(handlers::scrape_handler))
        .with_state(scraper)
        // Static file serving for the client
        .nest_service("/", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
