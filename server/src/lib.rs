use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod domain;
pub mod error;
pub mod file_reply;
mod handlers;
pub mod memory;
pub mod reducer;
pub mod registry;
pub mod sqlite;

use crate::domain::Storage;
use crate::memory::Memory;
use crate::sqlite::{Mode, Sqlite};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CURRENT_DIR: &str = "./";

pub type Database = Arc<Mutex<Box<dyn Storage + Send>>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_sessions,
        handlers::insert_many_from_form,
        handlers::get_files,
        handlers::get_stats,
        handlers::delete_session,
        handlers::insert_file,
        handlers::get_file_content,
        handlers::get_file_info,
        handlers::delete_file,
    ),
    components(schemas(
        kernel::ProcessedFile,
        kernel::Session,
        kernel::DeleteResult,
        kernel::RegistryStats,
        kernel::DataUrl,
    ))
)]
struct ApiDoc;

pub async fn run() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration from environment. Without SHRINKSTORE_DATA_FILE the
    // store is purely in-memory and lives only for this process.
    let port = env::var("SHRINKSTORE_PORT").unwrap_or_else(|_| String::from("5000"));
    let storage: Box<dyn Storage + Send> = match env::var("SHRINKSTORE_DATA_FILE") {
        Ok(db_file) => {
            let dir = env::var("SHRINKSTORE_DATA_DIR").unwrap_or_else(|_| String::from(CURRENT_DIR));
            let db = Path::new(&dir).join(&db_file);
            if !db.exists() {
                Sqlite::open(db.clone(), Mode::ReadWrite)
                    .expect("Database file cannot be created")
                    .new_database()
                    .unwrap_or_default();
            }
            Box::new(
                Sqlite::open(db, Mode::ReadWrite).expect("Database file cannot be opened"),
            )
        }
        Err(_) => Box::new(Memory::default()),
    };

    let socket: SocketAddr = format!("0.0.0.0:{port}").parse().expect("Invalid port");
    tracing::debug!("listening on {socket}");

    let app = create_routes(storage);

    let listener = tokio::net::TcpListener::bind(socket)
        .await
        .expect("Cannot bind server socket");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

pub fn create_routes(storage: Box<dyn Storage + Send>) -> Router {
    let db: Database = Arc::new(Mutex::new(storage));
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/api/", get(handlers::get_sessions))
        .route(
            "/api/:session",
            post(handlers::insert_many_from_form)
                .delete(handlers::delete_session)
                .get(handlers::get_files),
        )
        .route("/api/:session/stats", get(handlers::get_stats))
        .route("/api/:session/:file_name", post(handlers::insert_file))
        .route(
            "/api/file/:id",
            get(handlers::get_file_content).delete(handlers::delete_file),
        )
        .route("/api/file/:id/meta", get(handlers::get_file_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().on_failure(
                    |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        tracing::error!("Server error: {error}");
                    },
                ))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(
                    2 * 1024 * 1024 * 1024, /* 2GB */
                ))
                .into_inner(),
        )
        .with_state(db)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
