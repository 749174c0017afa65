use crate::biography::*;
use crate::router::*;
use axum::extract::DefaultBodyLimit;
use axum::{http, Router};
use biography_database::BiographyStore;
use biography_service::view::PICTURE_URL;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppOptions {
    /// Allow cross-origin calls to the JSON api.
    pub cors: bool,
    /// Request body limit, which bounds the size of an uploaded picture.
    pub max_upload_bytes: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            cors: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn build_app<T: BiographyStore>(store: T, options: &AppOptions) -> Router {
    let components = collect_components::<T>();

    let app = main_router(components, store)
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if options.cors {
        app.layer(cors_layer())
    } else {
        app
    }
}

/// Serves `app` until ctrl-c is received.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "biography editor listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
}

fn collect_components<T: BiographyStore>() -> Vec<(String, Router<T>)> {
    vec![
        // pages
        get_router_builder("/", home_page::<T>),
        get_router_builder("/edit", edit_page::<T>),
        post_router_builder("/edit", save_biography::<T>),
        get_router_builder(PICTURE_URL, get_picture::<T>),
        post_router_builder(PICTURE_URL, upload_picture::<T>),

        // json api
        get_router_builder("/api/biography", api_get_biography::<T>),
        post_router_builder("/api/biography", api_save_biography::<T>),
    ]
}
