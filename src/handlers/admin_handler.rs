use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{secrets_match, AdminGuard},
    errors::AppError,
    models::dto::request::{AdminLoginRequest, CreateQuizRequest, IdentityQuery, UpdateQuizRequest},
    services::http_helpers::{created, ok, ok_message},
};

#[post("/api/admin/login")]
async fn admin_login(
    state: web::Data<AppState>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let password = request.password.unwrap_or_default();
    if !secrets_match(&password, &state.config.admin_password) {
        log::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok(ok(json!({})))
}

#[post("/api/admin/quiz")]
async fn create_quiz(
    state: web::Data<AppState>,
    _admin: AdminGuard,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(created(json!({ "quiz": quiz })))
}

/// Full quiz including answer keys.
#[get("/api/admin/quiz/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    _admin: AdminGuard,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(ok(json!({ "quiz": quiz })))
}

#[put("/api/admin/quiz/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    _admin: AdminGuard,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&id, request.into_inner())
        .await?;
    Ok(ok(json!({ "quiz": quiz })))
}

#[delete("/api/admin/quiz/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    _admin: AdminGuard,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(ok_message("Quiz deleted"))
}

#[get("/api/admin/quizzes")]
async fn list_quizzes_with_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_with_stats().await?;
    Ok(ok(json!({ "quizzes": quizzes })))
}

#[get("/api/admin/results")]
async fn all_results(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let attempts = state.attempt_service.all_attempts().await?;
    Ok(ok(json!({ "attempts": attempts })))
}

#[get("/api/admin/results/users")]
async fn user_results(
    state: web::Data<AppState>,
    query: web::Query<IdentityQuery>,
) -> Result<HttpResponse, AppError> {
    let attempts = state
        .attempt_service
        .results_for_user(query.into_inner())
        .await?;
    Ok(ok(json!({ "attempts": attempts })))
}

#[get("/api/admin/results/{id}")]
async fn quiz_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempts = state.attempt_service.results_for_quiz(&id).await?;
    Ok(ok(json!({ "attempts": attempts })))
}
