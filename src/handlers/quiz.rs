use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    extractors::{AuthGuard, MaybeUser},
    names,
    rejections::{AppError, ResultExt},
    scoring, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUESTIONS_URL, get(list_questions))
        .route(names::SCORE_URL, post(submit_score))
        .route(names::RESULTS_URL, get(list_results))
}

#[derive(Deserialize)]
struct QuestionsQuery {
    subject_id: Option<i32>,
}

/// Public-safe listing: the correct answer never leaves the server.
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let questions = state
        .db
        .public_questions(query.subject_id)
        .await
        .reject("could not load questions")?;

    Ok(Json(json!({ "questions": questions })))
}

#[derive(Deserialize)]
struct ScoreSubmission {
    subject_id: Option<i32>,
    answers: Vec<Option<i32>>,
    time_taken: Option<i32>,
}

/// Grades a submission against the same ordered question list the listing
/// endpoint serves. An answers array that does not line up one-to-one with
/// the questions is a client error, never a silent mismatch.
async fn submit_score(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    Json(body): Json<ScoreSubmission>,
) -> Result<Json<scoring::ScoreResult>, AppError> {
    let keys = state
        .db
        .scoring_keys(body.subject_id)
        .await
        .reject("could not load questions")?;

    if keys.is_empty() || body.answers.len() != keys.len() {
        return Err(AppError::Input("invalid answers payload"));
    }

    let result = scoring::score_quiz(&keys, &body.answers);

    // Anonymous submissions are graded but leave no history.
    if let Some(user) = user {
        state
            .db
            .record_result(&user.email, body.subject_id, &result, body.time_taken)
            .await
            .reject("could not record result")?;
    }

    Ok(Json(result))
}

async fn list_results(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let results = state
        .db
        .results_for_user(&user.email)
        .await
        .reject("could not load results")?;

    Ok(Json(json!({ "results": results })))
}
