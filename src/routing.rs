//! Application router configuration.

use axum::{
    Router,
    http::Method,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    AppState, endpoints,
    entry::{
        create_entry_endpoint, dashboard_data_endpoint, delete_entry_endpoint,
        graph_data_endpoint, update_entry_endpoint,
    },
    user::entry_names_endpoint,
};

/// Return a router with all the app's routes.
///
/// Uploaded bill images are served back under the uploads path prefix, and
/// CORS is left permissive for the front end, mirroring the middleware stack
/// the API is deployed behind.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    Router::new()
        .route(endpoints::ENTRIES, post(create_entry_endpoint))
        .route(
            endpoints::ENTRY,
            put(update_entry_endpoint).delete(delete_entry_endpoint),
        )
        .route(endpoints::ENTRY_NAMES, get(entry_names_endpoint))
        .route(endpoints::GRAPH_DATA, get(graph_data_endpoint))
        .route(endpoints::DASHBOARD_DATA, get(dashboard_data_endpoint))
        .nest_service(
            endpoints::UPLOADS,
            ServeDir::new(state.uploads_dir.clone()),
        )
        .layer(cors)
        .with_state(state)
}
