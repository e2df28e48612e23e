// File: services/tourly_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tourly_config::load_config;
use tourly_scheduling::repository::InMemoryAppointmentRepository;
use tourly_scheduling::routes as scheduling_routes;
use tower_http::trace::TraceLayer;
use tracing::info;

mod service_factory;
mod services;

use service_factory::TourlyServiceFactory;

#[tokio::main]
async fn main() {
    tourly_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let repository = Arc::new(InMemoryAppointmentRepository::new());
    let factory = Arc::new(TourlyServiceFactory::new(config.clone()));

    let scheduling_router =
        scheduling_routes::routes(config.clone(), repository, factory);

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Tourly API!" }))
        .route("/health", get(|| async { "ok" }))
        .merge(scheduling_router);

    #[allow(unused_mut)] // for the openapi feature it needs to be mutable
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use tourly_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        let openapi_doc = SchedulingApiDoc::openapi();
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
