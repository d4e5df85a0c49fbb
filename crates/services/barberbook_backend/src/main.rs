// File: crates/services/barberbook_backend/src/main.rs
mod service_factory;

use axum::{routing::get, Router};
use barberbook_booking::handlers::BookingState;
use barberbook_booking::routes as booking_routes;
use barberbook_common::logging;
use barberbook_common::services::ServiceFactory;
use barberbook_config::load_config;
use barberbook_db::{
    AppointmentRepository, BlockedDateRepository, DbClient, ScheduleRepository,
    SqlAppointmentRepository, SqlBlockedDateRepository, SqlScheduleRepository,
};
#[cfg(feature = "stripe")]
use barberbook_stripe::routes as stripe_routes;
use service_factory::BarberbookServiceFactory;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to database");
    let schedule_repo = SqlScheduleRepository::new(db_client.clone());
    let blocked_repo = SqlBlockedDateRepository::new(db_client.clone());
    let appointment_repo = SqlAppointmentRepository::new(db_client);
    schedule_repo
        .init_schema()
        .await
        .expect("Failed to initialize settings schema");
    blocked_repo
        .init_schema()
        .await
        .expect("Failed to initialize blocked dates schema");
    appointment_repo
        .init_schema()
        .await
        .expect("Failed to initialize appointments schema");

    let factory = BarberbookServiceFactory::new(config.clone());

    let booking_state = Arc::new(BookingState {
        config: config.clone(),
        schedule_repo,
        blocked_repo,
        appointment_repo,
        payment_service: factory.payment_service(),
        notification_service: factory.notification_service(),
    });

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Barberbook API!" }))
        .merge(booking_routes::routes(booking_state));

    #[cfg(feature = "stripe")]
    let api_router = api_router.merge(stripe_routes::routes(config.clone()));

    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use barberbook_booking::doc::BookingApiDoc;
        #[cfg(feature = "stripe")]
        use barberbook_stripe::doc::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Barberbook API",
                version = "0.1.0",
                description = "Barbershop booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Barberbook", description = "Core booking endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)]
        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        #[cfg(feature = "stripe")]
        openapi_doc.merge(StripeApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Serve the booking widget in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ./dist");
        app = app.fallback_service(ServeDir::new("dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
