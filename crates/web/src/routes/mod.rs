//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to /beers
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (store answers a count)
//!
//! # HTML
//! GET  /beers?page=&size=       - Beer list (defaults page=0, size=25)
//! GET  /beer/{id}               - Beer detail
//! GET  /beer/new                - Empty creation form
//! POST /beer/edit/              - Create
//! GET  /beer/edit/{id}          - Edit form
//! POST /beer/edit/{id}          - Update
//! POST /beer/delete/{id}        - Delete (DELETE also accepted)
//!
//! # REST
//! GET    /api/v4/beer?page=&size=&sort=         - Page envelope
//! POST   /api/v4/beer                           - Create (201 + Location)
//! GET    /api/v4/beer/{id}                      - One beer
//! PUT    /api/v4/beer/{id}                      - Replace mutable fields
//! PATCH  /api/v4/beer/{id}                      - Merge supplied fields
//! DELETE /api/v4/beer/{id}                      - Delete (204)
//! GET    /api/v4/beer/search                    - Search links
//! GET    /api/v4/beer/search/findAllByBeerName  - Exact-name search
//! ```

pub mod api;
pub mod beers;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};

use brewery_core::BeerId;

use crate::error::AppError;
use crate::state::AppState;

/// Create the application router (without state or middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(html_routes())
        .merge(api_routes())
}

fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/beers", get(beers::index))
        .route("/beer/new", get(beers::new))
        .route("/beer/edit/", post(beers::create))
        .route("/beer/edit/{id}", get(beers::edit).post(beers::update))
        .route(
            "/beer/delete/{id}",
            post(beers::delete).delete(beers::delete),
        )
        .route("/beer/{id}", get(beers::show))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(api::COLLECTION_PATH, get(api::list).post(api::create))
        .route("/api/v4/beer/search", get(api::search_links))
        .route(
            "/api/v4/beer/search/findAllByBeerName",
            get(api::find_all_by_beer_name),
        )
        .route(
            "/api/v4/beer/{id}",
            get(api::show)
                .put(api::replace)
                .patch(api::patch)
                .delete(api::delete),
        )
}

async fn home() -> Redirect {
    Redirect::to("/beers")
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the beer store cannot be queried.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.beers().count().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Parse a path identifier. Malformed identifiers name no beer.
fn parse_beer_id(raw: &str) -> Result<BeerId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("beer {raw}")))
}
