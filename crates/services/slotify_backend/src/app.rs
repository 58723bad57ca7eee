// File: services/slotify_backend/src/app.rs
use axum::{routing::get, Router};
use http::{header, Method};
use slotify_common::panic_response;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app_state::AppState;

async fn welcome() -> &'static str {
    "Welcome to Slotify API!"
}

/// Assemble the full router: `/api` root, ChainSync under `/api/chainsync`
/// and, with the `openapi` feature, Swagger UI at `/api/docs`.
pub fn build_app(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(welcome))
        .nest("/chainsync", slotify_chainsync::routes(state.chainsync.clone()));

    #[allow(unused_mut)] // only the openapi feature adds to it
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use slotify_chainsync::openapi::ChainsyncApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Slotify API",
                version = "0.1.0",
                description = "Alert-driven emergency meeting scheduling"
            ),
            tags((name = "ChainSync", description = "Alert intake and meeting management")),
        )]
        struct ApiDoc;

        let openapi_doc = ApiDoc::openapi().nest("/api/chainsync", ChainsyncApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
