// Provider proxy handlers.
//
// GET /api/farcaster/user?username=|fid=  single profile, username goes
//                                         through the resolution fallbacks
// GET /api/farcaster/casts?fid=&limit=    recent casts, newest first
// GET /api/farcaster/search?q=&limit=     fuzzy username search
//
// Upstream failures surface as empty results, not 5xx, matching the
// provider contract.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::neynar::client::DEFAULT_SEARCH_LIMIT;
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct UserQuery {
    pub username: Option<String>,
    pub fid: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CastsQuery {
    pub fid: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/farcaster/user: look up one profile by username or FID.
pub async fn get_user(State(state): State<AppState>, Query(params): Query<UserQuery>) -> Response {
    let username = params.username.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let fid = params.fid.as_deref().map(str::trim).filter(|f| !f.is_empty());

    let profile = match (username, fid) {
        (Some(username), _) => state.provider.resolve_user(username).await,
        (None, Some(fid)) => match parse_fid(fid) {
            Ok(fid) => state.provider.user_by_id(fid).await,
            Err(resp) => return resp,
        },
        (None, None) => {
            return api_error(StatusCode::BAD_REQUEST, "Username or fid is required");
        }
    };

    match profile {
        Some(user) => Json(serde_json::json!({ "user": user })).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "User not found"),
    }
}

/// GET /api/farcaster/casts: recent casts for a FID.
pub async fn get_casts(State(state): State<AppState>, Query(params): Query<CastsQuery>) -> Response {
    let Some(fid) = params.fid.as_deref().map(str::trim).filter(|f| !f.is_empty()) else {
        return api_error(StatusCode::BAD_REQUEST, "FID is required");
    };
    let fid = match parse_fid(fid) {
        Ok(fid) => fid,
        Err(resp) => return resp,
    };

    let limit = params.limit.unwrap_or(state.config.cast_limit);
    let casts = state.provider.recent_posts(fid, limit).await;
    Json(serde_json::json!({ "casts": casts })).into_response()
}

/// GET /api/farcaster/search: fuzzy username search.
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return api_error(StatusCode::BAD_REQUEST, "Query is required");
    };

    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let users = state.provider.search_users(q, limit).await;
    Json(serde_json::json!({ "users": users })).into_response()
}

fn parse_fid(raw: &str) -> Result<u64, Response> {
    raw.parse::<u64>()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "FID must be a positive integer"))
}
