// GET /api/engagement?username=  full engagement report for one account.
//
// Resolves the username, pulls the configured number of recent casts and
// returns the report plus ready-made share links.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::EngagementReport;
use crate::share::{compose_url_with_frame, frame_url, share_text};
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct EngagementQuery {
    pub username: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ShareLinks {
    pub text: String,
    pub frame_url: String,
    pub compose_url: String,
}

#[derive(Serialize)]
pub struct EngagementResponse {
    #[serde(flatten)]
    pub report: EngagementReport,
    pub share: ShareLinks,
}

pub async fn get_engagement(
    State(state): State<AppState>,
    Query(params): Query<EngagementQuery>,
) -> Response {
    let Some(username) = params
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
    else {
        return api_error(StatusCode::BAD_REQUEST, "Username is required");
    };

    let Some(profile) = state.provider.resolve_user(username).await else {
        return api_error(StatusCode::NOT_FOUND, "User not found");
    };

    let limit = params.limit.unwrap_or(state.config.cast_limit);
    let posts = state.provider.recent_posts(profile.id, limit).await;
    let report = EngagementReport::build(profile, &posts, Utc::now());
    info!(
        handle = %report.profile.handle,
        posts = report.posts_analyzed,
        score = report.score,
        "Built engagement report"
    );

    let text = share_text(report.card_score, &report.top_supporters);
    let frame = frame_url(
        &state.config.app_url,
        &report.profile.handle,
        report.card_score,
        report.share_tier.as_str(),
    );
    let share = ShareLinks {
        compose_url: compose_url_with_frame(&text, &frame),
        frame_url: frame,
        text,
    };

    Json(EngagementResponse { report, share }).into_response()
}
