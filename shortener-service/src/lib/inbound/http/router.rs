use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts::delete_account;
use super::handlers::accounts::get_account;
use super::handlers::accounts::update_account;
use super::handlers::authentication::login;
use super::handlers::authentication::refresh;
use super::handlers::authentication::register;
use super::handlers::short_urls::create_short_url;
use super::handlers::short_urls::delete_short_url;
use super::handlers::short_urls::get_short_url;
use super::handlers::short_urls::list_short_urls;
use super::handlers::short_urls::redirect;
use super::handlers::short_urls::update_short_url;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;
use crate::authentication::ports::AuthServicePort;
use crate::short_url::ports::ShortUrlServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub account_service: Arc<dyn AccountServicePort>,
    pub short_url_service: Arc<dyn ShortUrlServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    account_service: Arc<dyn AccountServicePort>,
    short_url_service: Arc<dyn ShortUrlServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        account_service,
        short_url_service,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/:short_url", get(redirect));

    let protected_routes = Router::new()
        .route(
            "/api/user/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/api/url", post(create_short_url).get(list_short_urls))
        .route(
            "/api/url/:id",
            get(get_short_url)
                .put(update_short_url)
                .delete(delete_short_url),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span so bearer tokens never reach the logs.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
