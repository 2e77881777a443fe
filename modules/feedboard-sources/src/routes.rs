use axum::{
    extract::Query,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use feedboard_common::{config::split_list, ErrorBody, TypeFilter};
use serde::{Deserialize, Serialize};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use crate::error::SourceError;
use crate::generate;

/// Largest `limit` honoured per topic; larger requests are clamped.
pub const MAX_LIMIT: u32 = 100;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

// --- Query structs ---

#[derive(Deserialize)]
pub struct FeedQuery {
    categories: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Deserialize)]
pub struct SocialQuery {
    hashtags: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    #[serde(rename = "type")]
    content_type: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

// --- Router ---

/// All mock endpoints. Social and search answer cross-origin requests,
/// errors and pre-flight included.
pub fn router() -> Router {
    let cross_origin = Router::new()
        .route("/api/social", get(api_social).options(preflight))
        .route("/api/search", get(api_search).options(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ));

    Router::new()
        .route("/", get(health))
        .route("/api/news", get(api_news))
        .route("/api/recommendations", get(api_recommendations))
        .merge(cross_origin)
}

// --- Helpers ---

/// Leading decimal digits of `raw`, else `default`. `"3abc"` reads as 3.
fn parse_number(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(default)
}

fn parse_limit(raw: Option<&str>, default: u32) -> u32 {
    parse_number(raw, default).min(MAX_LIMIT)
}

/// Comma-separated topics, or `default` when none are given.
fn topics(raw: Option<&str>, default: &str) -> Vec<String> {
    let list = raw.map(split_list).unwrap_or_default();
    if list.is_empty() {
        vec![default.to_string()]
    } else {
        list
    }
}

/// Missing or blank means every type.
fn parse_type(raw: Option<&str>) -> Result<TypeFilter, SourceError> {
    match raw.filter(|t| !t.is_empty()) {
        None => Ok(TypeFilter::All),
        Some(raw) => raw
            .parse()
            .map_err(|_| SourceError::UnknownType(raw.to_string())),
    }
}

fn respond<T: Serialize>(result: Result<T, SourceError>, failure: &'static str) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(SourceError::UnknownType(raw)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: format!("Unknown content type: {raw}"),
            }),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "{failure}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: failure.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// --- Handlers ---

async fn health() -> &'static str {
    "ok"
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn api_news(Query(params): Query<FeedQuery>) -> impl IntoResponse {
    let categories = topics(params.categories.as_deref(), "general");
    let page = parse_number(params.page.as_deref(), 1);
    let limit = parse_limit(params.limit.as_deref(), 10);
    respond(
        generate::news_page(&categories, page, limit, Utc::now()),
        "Failed to fetch news",
    )
}

pub async fn api_recommendations(Query(params): Query<FeedQuery>) -> impl IntoResponse {
    let categories = topics(params.categories.as_deref(), "technology");
    let page = parse_number(params.page.as_deref(), 1);
    let limit = parse_limit(params.limit.as_deref(), 8);
    respond(
        generate::recommendations_page(&categories, page, limit, Utc::now()),
        "Failed to fetch recommendations",
    )
}

pub async fn api_social(Query(params): Query<SocialQuery>) -> impl IntoResponse {
    let hashtags = topics(params.hashtags.as_deref(), "trending");
    let page = parse_number(params.page.as_deref(), 1);
    let limit = parse_limit(params.limit.as_deref(), 12);
    respond(
        generate::social_page(&hashtags, page, limit, Utc::now()),
        "Failed to fetch social posts",
    )
}

pub async fn api_search(Query(params): Query<SearchQuery>) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let page = parse_number(params.page.as_deref(), 1);
    let limit = parse_limit(params.limit.as_deref(), 20);
    let result = parse_type(params.content_type.as_deref())
        .and_then(|ct| generate::search_page(&query, ct, page, limit, Utc::now()));
    respond(result, "Failed to perform search")
}
