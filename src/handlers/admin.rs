use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    db::models::NewQuestion,
    db::QuestionFilter,
    extractors::AdminGuard,
    names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            names::ADMIN_QUESTIONS_URL,
            get(list_questions).post(create_question),
        )
        .route(
            "/api/admin/questions/{id}",
            put(update_question).delete(delete_question),
        )
        .route(
            names::ADMIN_SUBJECTS_URL,
            get(list_subjects).post(create_subject),
        )
        .route(
            "/api/admin/subjects/{id}",
            put(update_subject).delete(delete_subject),
        )
        .route(names::ADMIN_TOPICS_URL, get(list_topics).post(create_topic))
        .route("/api/admin/topics/{id}", delete(delete_topic))
        .route(names::ADMIN_USERS_URL, get(list_users))
        .route("/api/admin/users/{id}/role", put(set_user_role))
}

#[derive(Deserialize)]
struct QuestionsQuery {
    subject_id: Option<i32>,
    topic_id: Option<i32>,
}

/// Full question rows including correct answers, the admin panel's data
/// source. Reads are public; every mutation below requires the admin role.
async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filter = match (query.subject_id, query.topic_id) {
        (Some(id), _) => QuestionFilter::Subject(id),
        (None, Some(id)) => QuestionFilter::Topic(id),
        (None, None) => QuestionFilter::All,
    };

    let questions = state
        .db
        .questions_admin(filter)
        .await
        .reject("could not load questions")?;

    Ok(Json(json!({ "questions": questions })))
}

#[derive(Deserialize)]
struct QuestionBody {
    subject_id: i32,
    topic_id: Option<i32>,
    text: String,
    options: Vec<String>,
    correct_index: i32,
    difficulty: Option<String>,
    explanation: Option<String>,
}

impl QuestionBody {
    /// Field-level validation, including the invariant that `correct_index`
    /// addresses an existing option.
    fn validate(&self) -> Result<NewQuestion<'_>, AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Input("question text is required"));
        }
        if self.options.len() < 2 {
            return Err(AppError::Input("at least two options are required"));
        }
        if self.correct_index < 0 || self.correct_index as usize >= self.options.len() {
            return Err(AppError::Input("correct_index is out of range"));
        }

        let difficulty = match self.difficulty.as_deref() {
            Some(d) if names::DIFFICULTIES.contains(&d) => d,
            Some(_) => return Err(AppError::Input("invalid difficulty")),
            None => names::DEFAULT_DIFFICULTY,
        };

        Ok(NewQuestion {
            subject_id: self.subject_id,
            topic_id: self.topic_id,
            text: self.text.trim(),
            options: &self.options,
            correct_index: self.correct_index,
            difficulty,
            explanation: self.explanation.as_deref(),
        })
    }
}

async fn create_question(
    AdminGuard(user): AdminGuard,
    State(state): State<AppState>,
    Json(body): Json<QuestionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let question = body.validate()?;

    if !state
        .db
        .subject_exists(question.subject_id)
        .await
        .reject("could not check subject")?
    {
        return Err(AppError::Input("unknown subject"));
    }

    let id = state
        .db
        .create_question(question, &user.email)
        .await
        .reject("could not create question")?;

    Ok(Json(json!({ "id": id })))
}

async fn update_question(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
    Json(body): Json<QuestionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let question = body.validate()?;

    if !state
        .db
        .subject_exists(question.subject_id)
        .await
        .reject("could not check subject")?
    {
        return Err(AppError::Input("unknown subject"));
    }

    let updated = state
        .db
        .update_question(question_id, question)
        .await
        .reject("could not update question")?;
    if !updated {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}

async fn delete_question(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .db
        .delete_question(question_id)
        .await
        .reject("could not delete question")?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}

async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let subjects = state
        .db
        .subjects()
        .await
        .reject("could not load subjects")?;

    Ok(Json(json!({ "subjects": subjects })))
}

#[derive(Deserialize)]
struct SubjectBody {
    name: String,
    description: Option<String>,
}

async fn create_subject(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Json(body): Json<SubjectBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("subject name is required"));
    }

    let id = state
        .db
        .create_subject(body.name.trim(), body.description.as_deref())
        .await
        .reject_input("could not create subject")?;

    Ok(Json(json!({ "id": id })))
}

async fn update_subject(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(subject_id): Path<i32>,
    Json(body): Json<SubjectBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("subject name is required"));
    }

    let updated = state
        .db
        .update_subject(subject_id, body.name.trim(), body.description.as_deref())
        .await
        .reject("could not update subject")?;
    if !updated {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}

/// Topics and questions under the subject are removed by FK cascade, no
/// application-level transaction involved.
async fn delete_subject(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(subject_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .db
        .delete_subject(subject_id)
        .await
        .reject("could not delete subject")?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}

#[derive(Deserialize)]
struct TopicsQuery {
    subject_id: i32,
}

async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<TopicsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let topics = state
        .db
        .topics_for_subject(query.subject_id)
        .await
        .reject("could not load topics")?;

    Ok(Json(json!({ "topics": topics })))
}

#[derive(Deserialize)]
struct TopicBody {
    subject_id: i32,
    name: String,
    description: Option<String>,
}

async fn create_topic(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Json(body): Json<TopicBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("topic name is required"));
    }

    if !state
        .db
        .subject_exists(body.subject_id)
        .await
        .reject("could not check subject")?
    {
        return Err(AppError::Input("unknown subject"));
    }

    let id = state
        .db
        .create_topic(body.subject_id, body.name.trim(), body.description.as_deref())
        .await
        .reject_input("could not create topic")?;

    Ok(Json(json!({ "id": id })))
}

async fn delete_topic(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(topic_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state
        .db
        .delete_topic(topic_id)
        .await
        .reject("could not delete topic")?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}

async fn list_users(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let users = state.db.list_users().await.reject("could not load users")?;
    Ok(Json(json!({ "users": users })))
}

#[derive(Deserialize)]
struct RoleBody {
    role: String,
}

async fn set_user_role(
    AdminGuard(_user): AdminGuard,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<RoleBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !names::ROLES.contains(&body.role.as_str()) {
        return Err(AppError::Input("invalid role"));
    }

    let updated = state
        .db
        .set_user_role(user_id, &body.role)
        .await
        .reject("could not update role")?;
    if !updated {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "ok": true })))
}
