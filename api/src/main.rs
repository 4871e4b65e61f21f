use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use bookstore_api::application::ports::drive_access_port::DriveAccessPort;
use bookstore_api::application::ports::storage_port::StoragePort;
use bookstore_api::bootstrap::app_context::{AppContext, AppServices};
use bookstore_api::bootstrap::config::{Config, StorageBackend};
use bookstore_api::infrastructure::db::repositories;
use bookstore_api::infrastructure::drive::{
    self, DisabledDriveAccess, GoogleDriveAccess, ServiceAccountKey,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            bookstore_api::presentation::http::auth::register,
            bookstore_api::presentation::http::auth::login,
            bookstore_api::presentation::http::auth::logout,
            bookstore_api::presentation::http::books::list_books,
            bookstore_api::presentation::http::books::top_books,
            bookstore_api::presentation::http::books::related_books,
            bookstore_api::presentation::http::books::get_book,
            bookstore_api::presentation::http::books::create_book,
            bookstore_api::presentation::http::books::update_book,
            bookstore_api::presentation::http::books::delete_book,
            bookstore_api::presentation::http::books::download_sample,
            bookstore_api::presentation::http::users::get_profile,
            bookstore_api::presentation::http::users::add_to_cart,
            bookstore_api::presentation::http::users::remove_from_cart,
            bookstore_api::presentation::http::users::list_users,
            bookstore_api::presentation::http::users::get_user,
            bookstore_api::presentation::http::orders::create_order,
            bookstore_api::presentation::http::orders::list_orders,
            bookstore_api::presentation::http::orders::list_my_orders,
            bookstore_api::presentation::http::orders::get_order,
            bookstore_api::presentation::http::orders::submit_payment_proof,
            bookstore_api::presentation::http::orders::confirm_payment,
            bookstore_api::presentation::http::orders::retry_grants,
            bookstore_api::presentation::http::orders::sms_webhook,
            bookstore_api::presentation::http::payments::record_transaction,
            bookstore_api::presentation::http::payments::list_transactions,
            bookstore_api::presentation::http::settings::get_settings,
            bookstore_api::presentation::http::settings::update_settings,
            bookstore_api::presentation::http::admin::get_stats,
            bookstore_api::presentation::http::uploads::upload,
            bookstore_api::presentation::http::health::health,
        ),
        components(schemas(
            bookstore_api::presentation::http::error::MessageResponse,
            bookstore_api::presentation::http::auth::RegisterRequest,
            bookstore_api::presentation::http::auth::LoginRequest,
            bookstore_api::presentation::http::auth::UserResponse,
            bookstore_api::presentation::http::auth::AuthResponse,
            bookstore_api::presentation::http::books::BookResponse,
            bookstore_api::presentation::http::books::BookRequest,
            bookstore_api::presentation::http::books::SampleResponse,
            bookstore_api::presentation::http::users::CartLineResponse,
            bookstore_api::presentation::http::users::ProfileResponse,
            bookstore_api::presentation::http::users::SampleDownloadResponse,
            bookstore_api::presentation::http::users::UserDetailResponse,
            bookstore_api::presentation::http::users::UserWithCartResponse,
            bookstore_api::presentation::http::users::AddToCartRequest,
            bookstore_api::presentation::http::orders::OrderItemResponse,
            bookstore_api::presentation::http::orders::OrderResponse,
            bookstore_api::presentation::http::orders::AdminOrderResponse,
            bookstore_api::presentation::http::orders::CreateOrderRequest,
            bookstore_api::presentation::http::orders::PaymentProofRequest,
            bookstore_api::presentation::http::orders::ConfirmPaymentRequest,
            bookstore_api::presentation::http::orders::GrantResponse,
            bookstore_api::presentation::http::orders::SmsWebhookRequest,
            bookstore_api::presentation::http::orders::SmsWebhookResponse,
            bookstore_api::presentation::http::payments::TransactionResponse,
            bookstore_api::presentation::http::payments::RecordTransactionRequest,
            bookstore_api::presentation::http::payments::RecordTransactionResponse,
            bookstore_api::presentation::http::settings::SocialLinksBody,
            bookstore_api::presentation::http::settings::SettingsResponse,
            bookstore_api::presentation::http::settings::UpdateSettingsBody,
            bookstore_api::presentation::http::admin::MonthlySalesResponse,
            bookstore_api::presentation::http::admin::BookSalesResponse,
            bookstore_api::presentation::http::admin::StatsResponse,
            bookstore_api::presentation::http::uploads::UploadResponse,
            bookstore_api::presentation::http::uploads::UploadMultipart,
            bookstore_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and sessions"),
            (name = "Books", description = "Catalog"),
            (name = "Users", description = "Profiles and carts"),
            (name = "Orders", description = "Checkout and payment proofs"),
            (name = "Payments", description = "Bank credits and reconciliation"),
            (name = "Settings", description = "Storefront settings"),
            (name = "Admin", description = "Dashboard statistics"),
            (name = "Uploads", description = "Image and PDF uploads"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(_)) | None if cfg.is_production => {
            // FRONTEND_URL is enforced in production; deny everything if it is still unusable
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bookstore_api=debug,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting bookstore backend");

    // Database
    let pool =
        bookstore_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    bookstore_api::infrastructure::db::migrate(&pool).await?;

    let storage_port: Arc<dyn StoragePort> = match cfg.storage_backend {
        StorageBackend::Filesystem => {
            if let Err(e) = tokio::fs::create_dir_all(&cfg.uploads_dir).await {
                warn!(error = ?e, dir = %cfg.uploads_dir, "Failed to create uploads dir");
            }
            Arc::new(
                bookstore_api::infrastructure::storage::filesystem::FsStoragePort::new(
                    std::path::PathBuf::from(&cfg.uploads_dir),
                ),
            )
        }
        StorageBackend::Cloudinary => {
            let cloudinary = cfg
                .cloudinary
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("cloudinary backend selected without credentials"))?;
            Arc::new(
                bookstore_api::infrastructure::storage::cloudinary::CloudinaryStoragePort::new(
                    cloudinary,
                ),
            )
        }
    };

    let drive_access: Arc<dyn DriveAccessPort> =
        match drive::resolve_key_path(cfg.google_service_account_key.as_deref()) {
            Some(path) => {
                let key = ServiceAccountKey::from_file(&path).await?;
                let access = GoogleDriveAccess::new(key)?;
                info!(path = %path.display(), client_email = %access.client_email(), "drive_access_enabled");
                Arc::new(access)
            }
            None => {
                warn!("no Google service account key found; paid books will not be shared until one is configured");
                Arc::new(DisabledDriveAccess)
            }
        };

    let services = AppServices::new(
        Arc::new(repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        )),
        Arc::new(repositories::book_repository_sqlx::SqlxBookRepository::new(
            pool.clone(),
        )),
        Arc::new(repositories::cart_repository_sqlx::SqlxCartRepository::new(
            pool.clone(),
        )),
        Arc::new(repositories::order_repository_sqlx::SqlxOrderRepository::new(
            pool.clone(),
        )),
        Arc::new(
            repositories::transaction_repository_sqlx::SqlxTransactionRepository::new(
                pool.clone(),
            ),
        ),
        Arc::new(
            repositories::settings_repository_sqlx::SqlxSettingsRepository::new(pool.clone()),
        ),
        Arc::new(
            repositories::sample_download_repository_sqlx::SqlxSampleDownloadRepository::new(
                pool.clone(),
            ),
        ),
        Arc::new(repositories::stats_repository_sqlx::SqlxStatsRepository::new(
            pool.clone(),
        )),
        storage_port,
        drive_access,
    );

    let ctx = AppContext::new(cfg.clone(), services);

    let cors = cors_layer(&cfg);

    // Multipart framing adds a little on top of the file itself
    let body_limit = cfg.upload_max_bytes.saturating_add(64 * 1024);

    let app = Router::new()
        .nest(
            "/api",
            bookstore_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api/auth",
            bookstore_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::books::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::users::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::orders::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::payments::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::settings::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::admin::routes(ctx.clone()),
        )
        .nest(
            "/api",
            bookstore_api::presentation::http::uploads::routes(ctx.clone()),
        )
        .nest_service("/uploads", ServeDir::new(&cfg.uploads_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
