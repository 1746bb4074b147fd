//! Community Q&A endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::question::{
        Answer, CreateAnswer, CreateQuestion, Question, QuestionDetail, QuestionSummary,
    },
};

use super::AuthenticatedUser;

/// List questions with answer counts, newest first
#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Questions", body = Vec<QuestionSummary>)
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<QuestionSummary>>> {
    let questions = state.services.questions.list().await?;
    Ok(Json(questions))
}

/// Get a question with its answers
#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "questions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question detail", body = QuestionDetail),
        (status = 404, description = "Question not found")
    )
)]
pub async fn get_detail(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(question_id): Path<i32>,
) -> AppResult<Json<QuestionDetail>> {
    let detail = state.services.questions.get_detail(question_id).await?;
    Ok(Json(detail))
}

/// Post a question
#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    security(("bearer_auth" = [])),
    request_body = CreateQuestion,
    responses(
        (status = 201, description = "Question posted", body = Question)
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateQuestion>,
) -> AppResult<(StatusCode, Json<Question>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = state
        .services
        .questions
        .create(request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Post an answer to a question
#[utoipa::path(
    post,
    path = "/questions/{id}/answers",
    tag = "questions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Question ID")),
    request_body = CreateAnswer,
    responses(
        (status = 201, description = "Answer posted", body = Answer),
        (status = 404, description = "Question not found")
    )
)]
pub async fn answer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(question_id): Path<i32>,
    Json(request): Json<CreateAnswer>,
) -> AppResult<(StatusCode, Json<Answer>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let answer = state
        .services
        .questions
        .answer(question_id, request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(answer)))
}
