use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use repairdesk::config::AppConfig;
use repairdesk::db;
use repairdesk::handlers;
use repairdesk::services::messaging::cloud::WhatsAppCloudChannel;
use repairdesk::services::messaging::console::ConsoleChannel;
use repairdesk::services::messaging::MessageChannel;
use repairdesk::services::notification::{Notifier, NotifierConfig};
use repairdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let channel: Box<dyn MessageChannel> = if config.whatsapp_access_token.is_empty() {
        tracing::info!("no WhatsApp credentials configured, using console message channel");
        Box::new(ConsoleChannel)
    } else {
        tracing::info!("using WhatsApp Cloud API message channel");
        Box::new(WhatsAppCloudChannel::new(
            config.whatsapp_phone_number_id.clone(),
            config.whatsapp_access_token.clone(),
        ))
    };

    let notifier = Notifier::new(
        NotifierConfig {
            admin_whatsapp_number: config.admin_whatsapp_number.clone(),
            admin_email: config.admin_email.clone(),
            app_name: config.app_name.clone(),
        },
        channel,
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        notifier,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/phone/:phone_number",
            get(handlers::bookings::get_bookings_by_phone),
        )
        .route("/api/reviews", post(handlers::reviews::create_review))
        .route(
            "/api/reviews/approved",
            get(handlers::reviews::get_approved_reviews),
        )
        .route(
            "/api/reviews/rating",
            get(handlers::reviews::get_average_rating),
        )
        .route("/api/gallery", get(handlers::gallery::get_active_images))
        .route(
            "/api/gallery/upload",
            post(handlers::gallery::upload_image),
        )
        .route(
            "/api/gallery/service/:service_type",
            get(handlers::gallery::get_images_by_service),
        )
        .route("/api/services", get(handlers::catalog::get_service_types))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/bookings/:id",
            get(handlers::admin::get_booking)
                .put(handlers::admin::update_booking)
                .delete(handlers::admin::delete_booking),
        )
        .route(
            "/api/admin/bookings/status/:status",
            get(handlers::admin::get_bookings_by_status),
        )
        .route("/api/admin/reviews", get(handlers::admin::get_reviews))
        .route(
            "/api/admin/reviews/pending",
            get(handlers::admin::get_pending_reviews),
        )
        .route(
            "/api/admin/reviews/:id/approve",
            put(handlers::admin::approve_review),
        )
        .route(
            "/api/admin/reviews/:id/reject",
            put(handlers::admin::reject_review),
        )
        .route(
            "/api/admin/reviews/:id",
            delete(handlers::admin::delete_review),
        )
        .route(
            "/api/admin/gallery/upload",
            post(handlers::admin::upload_gallery_image),
        )
        .route(
            "/api/admin/gallery",
            get(handlers::admin::get_gallery_images),
        )
        .route(
            "/api/admin/gallery/:id",
            put(handlers::admin::update_gallery_image)
                .delete(handlers::admin::delete_gallery_image),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(handlers::admin::dashboard_stats),
        )
        .nest_service("/uploads/gallery", ServeDir::new(&config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
