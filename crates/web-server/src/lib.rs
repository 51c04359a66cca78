use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod request;

/// Builds the application router with its middleware stack.
///
/// The router holds no state: every request is fitted independently.
pub fn app(settings: &Settings) -> Router {
    // Any origin may call the endpoint.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/v1/health", get(handlers::health))
        .route(
            "/v1/regression/scale-decay",
            post(handlers::scale_decay_regression),
        )
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    // Tracing is initialized by the binary; only emit events here.
    let addr = settings.addr();
    let app = app(&settings);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
