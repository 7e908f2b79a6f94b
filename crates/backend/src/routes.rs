use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Sales entry
        .route(
            "/api/sales_entry",
            get(handlers::a001_sales_entry::list).post(handlers::a001_sales_entry::create),
        )
        .route(
            "/api/sales_entry/:id",
            get(handlers::a001_sales_entry::get_by_id).delete(handlers::a001_sales_entry::delete),
        )
        // D100 Sales report dashboard
        .route(
            "/api/d100/sales_report",
            get(handlers::d100_sales_report::get_sales_report),
        )
        .route(
            "/api/d100/sales_report/sample",
            get(handlers::d100_sales_report::get_sample_report),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
