use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{app_state::AppState, errors::AppError, services::http_helpers::ok};

#[get("/api/quiz/all")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_summaries().await?;
    Ok(ok(json!({ "quizzes": quizzes })))
}

#[get("/api/quiz/count")]
async fn quiz_count(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let total = state.quiz_service.count().await?;
    Ok(ok(json!({ "totalQuizzes": total })))
}

/// Quiz as shown to participants, without answer keys.
#[get("/api/quiz/{quizId}")]
async fn get_public_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_public_quiz(&quiz_id).await?;
    Ok(ok(json!({ "quiz": quiz })))
}
