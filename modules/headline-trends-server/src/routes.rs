use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use headline_trends_core::occurrences::parse_keywords;
use headline_trends_core::{
    build_occurrence_series, sample_headlines, HeadlineRecord, HeadlineSearch, OccurrenceSeries,
    RateLimitConfig, ServerConfig,
};

use crate::error::{generic_response, ApiError};
use crate::query::QueryParams;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn HeadlineSearch>,
    pub rate_limit: RateLimitConfig,
}

impl AppState {
    pub fn new(search: Arc<dyn HeadlineSearch>, rate_limit: RateLimitConfig) -> Self {
        Self { search, rate_limit }
    }

    /// A fresh limiter; each endpoint gets its own budget per client.
    fn limiter(&self) -> Arc<RateLimiter> {
        Arc::new(RateLimiter::new(
            self.rate_limit.requests_per_window,
            Duration::from_secs(self.rate_limit.window_secs),
        ))
    }
}

pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| {
            // a wildcard cannot be combined with credentials
            if o == "*" {
                warn!("Ignoring wildcard allowed origin");
                return None;
            }
            match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    warn!(origin = %o, "Ignoring unparsable allowed origin");
                    None
                }
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_credentials(true);

    let samples = get(samples_handler)
        .route_layer(middleware::from_fn_with_state(state.limiter(), rate_limit));
    let occurrences = get(occurrences_handler)
        .route_layer(middleware::from_fn_with_state(state.limiter(), rate_limit));

    Router::new()
        .route("/samples", samples)
        .route("/occurrences", occurrences)
        .route("/health", get(health))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(cors)
        // Logging layer: method + path only (no query params, no IP)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

async fn samples_handler(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<HeadlineRecord>>, ApiError> {
    let keyword = params.get("keyword");
    let year_month = params.get("year_month");
    info!(?keyword, ?year_month, "Received samples request");

    let sample = sample_headlines(state.search.as_ref(), keyword, year_month).await?;

    Ok(Json(sample.items))
}

async fn occurrences_handler(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<OccurrenceSeries>>, ApiError> {
    let raw = params.get("keywords");
    info!(keywords = ?raw, "Received occurrences request");

    let keywords = parse_keywords(raw)?;
    let series = build_occurrence_series(state.search.as_ref(), &keywords).await?;

    Ok(Json(series))
}

async fn health() -> &'static str {
    "ok"
}

/// Requests without a known peer address are not limited.
async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    if let Some(ip) = ip {
        if !limiter.check(ip, Instant::now()).await {
            warn!(path = %request.uri().path(), "Rate limit exceeded");
            return generic_response(StatusCode::TOO_MANY_REQUESTS);
        }
    }

    next.run(request).await
}
