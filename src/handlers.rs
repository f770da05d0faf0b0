//! Route handlers for the yote endpoints and the leaderboard page

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use tracing::{debug, info, warn};

use crate::metrics::{self, VoteOutcomeKind};
use crate::state::AppState;
use crate::tally::{CastOutcome, Leaderboard};
use crate::types::{AccountQuery, YoteQuery};

const FAVICON: &[u8] = include_bytes!("../static/favicon.ico");

/// GET / - self-refreshing leaderboard page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let board = state.ranked_results();
    Html(render_leaderboard(&board))
}

/// GET /yote?username=U&link=L - callback vote carrying a link the team
/// id is extracted from
pub async fn yote(State(state): State<AppState>, Query(query): Query<YoteQuery>) -> Response {
    debug!("incoming yote on main account");

    let username = query.username.as_deref().unwrap_or("");
    let link = query.link.as_deref().unwrap_or("");
    let outcome = state.cast_vote(username, link);

    respond_with_outcome("URL", outcome)
}

/// GET /yote/{account} - callback vote against a per-team account name
/// (used by the site buttons)
pub async fn yote_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Query(query): Query<AccountQuery>,
) -> Response {
    debug!("incoming yote on {} account", account);

    let username = query.username.as_deref().unwrap_or("");
    let outcome = state.cast_vote(username, &account);

    respond_with_outcome("team account", outcome)
}

/// GET /reset - clear all votes and voter state, then bounce to the page
pub async fn reset(State(state): State<AppState>) -> Redirect {
    warn!("resetting all vote state");
    state.reset();
    metrics::record_reset();
    Redirect::to("/")
}

/// GET /favicon.ico
pub async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/vnd.microsoft.icon")], FAVICON)
}

/// GET /healthz
pub async fn health_check() -> &'static str {
    "ok"
}

/// GET /admin/stats - metrics snapshot, gated on the x-metrics-token
/// header matching METRICS_AUTH_TOKEN
pub async fn admin_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let expected = state.metrics_auth_token.as_deref().ok_or(StatusCode::UNAUTHORIZED)?;
    let provided = headers
        .get("x-metrics-token")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if provided != expected {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Json(metrics::snapshot_as_json()))
}

/// Log and count the outcome, then serialize the vote scalar back to the
/// caller. Rejected votes are echoed too; only NoTeam yields an empty
/// body.
fn respond_with_outcome(source: &str, outcome: CastOutcome) -> Response {
    let kind = match &outcome {
        CastOutcome::RecordedFirst(vote) => {
            info!("recorded {} yote 1 - {:?}", source, vote);
            VoteOutcomeKind::RecordedFirst
        }
        CastOutcome::RecordedSecond(vote) => {
            info!("recorded {} yote 2 - {:?}", source, vote);
            VoteOutcomeKind::RecordedSecond
        }
        CastOutcome::RejectedFinished(vote) => {
            info!("rejected {} yote - {:?}", source, vote);
            VoteOutcomeKind::RejectedFinished
        }
        CastOutcome::RejectedDuplicate(vote) => {
            info!("rejected duplicate {} yote - {:?}", source, vote);
            VoteOutcomeKind::RejectedDuplicate
        }
        CastOutcome::NoTeam => {
            info!("ignored {} yote with no matching team", source);
            VoteOutcomeKind::NoTeam
        }
    };
    metrics::record_vote_outcome(kind);

    match outcome.vote() {
        Some(vote) => Json(vote).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

fn render_leaderboard(board: &Leaderboard) -> String {
    let winner_line = match board.winner {
        Some(team) => format!("<p class=\"winner\">Winner: {}</p>", team),
        None => "<p class=\"winner\">No winner yet</p>".to_string(),
    };
    let runner_up_line = match board.runner_up {
        Some(team) => format!("<p class=\"runnerup\">Runner-up: {}</p>", team),
        None => String::new(),
    };

    let mut rows = String::new();
    for standing in &board.standings {
        rows.push_str(&format!(
            "<li>{}: {} primary / {} secondary</li>\n",
            standing.team, standing.rank1, standing.rank2
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"5\">\n\
         <title>Yote leaderboard</title>\n</head>\n<body>\n\
         <h1>Yote leaderboard</h1>\n{}\n{}\n<ol>\n{}</ol>\n</body>\n</html>\n",
        winner_line, runner_up_line, rows
    )
}
