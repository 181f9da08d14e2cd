// GET /api/frame/engagement  frame metadata page for a shared score.
//
// All params are optional so a bare link still renders a valid frame.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::scoring::tier::ScoreTier;
use crate::share::frame_html;
use crate::web::AppState;

#[derive(Deserialize, Default)]
pub struct FrameQuery {
    pub username: Option<String>,
    pub score: Option<String>,
    pub tier: Option<String>,
}

pub async fn engagement_frame(
    State(state): State<AppState>,
    Query(params): Query<FrameQuery>,
) -> Response {
    let username = params
        .username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "Anonymous".to_string());
    let score = params
        .score
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0)
        .min(100);
    let tier = params
        .tier
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| ScoreTier::Starter.as_str().to_string());

    let html = frame_html(&state.config.app_url, &username, score, &tier);
    (
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Html(html),
    )
        .into_response()
}
