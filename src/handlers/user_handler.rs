use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        CheckAttemptRequest, IdentityQuery, LoginRequest, PrecheckRequest, SubmitAttemptRequest,
    },
    services::http_helpers::{created, ok, ok_message},
};

#[post("/api/user/precheck")]
async fn precheck(
    state: web::Data<AppState>,
    request: web::Json<PrecheckRequest>,
) -> Result<HttpResponse, AppError> {
    state.user_service.precheck(request.into_inner()).await?;
    Ok(ok_message("User can proceed"))
}

/// 201 on first registration, 200 on a returning login.
#[post("/api/user/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.user_service.login_or_register(request.into_inner()).await?;

    if outcome.created {
        Ok(created(json!({
            "message": "User registered",
            "userId": outcome.user_id,
        })))
    } else {
        Ok(ok(json!({
            "message": "User logged in",
            "userId": outcome.user_id,
        })))
    }
}

#[post("/api/user/check")]
async fn check_attempt(
    state: web::Data<AppState>,
    request: web::Json<CheckAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let attempted = state.attempt_service.has_attempted(request.into_inner()).await?;
    Ok(ok(json!({ "alreadyAttempted": attempted })))
}

#[post("/api/user/submit/{quizId}")]
async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .submit(&quiz_id, request.into_inner())
        .await?;

    Ok(created(json!({
        "message": "Quiz submitted",
        "score": attempt.score,
        "total": attempt.total,
        "attemptId": attempt.id,
    })))
}

#[get("/api/user/completed")]
async fn completed_quizzes(
    state: web::Data<AppState>,
    query: web::Query<IdentityQuery>,
) -> Result<HttpResponse, AppError> {
    let ids = state
        .attempt_service
        .completed_quiz_ids(query.into_inner())
        .await?;
    Ok(ok(json!({ "completedQuizIds": ids })))
}

#[get("/api/user/attempt/{attemptId}")]
async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.get_attempt(&attempt_id).await?;
    Ok(ok(json!({ "attempt": attempt })))
}

#[get("/api/user/count")]
async fn user_count(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let total = state.user_service.count().await?;
    Ok(ok(json!({ "totalUsers": total })))
}

#[get("/api/user/attemptcount")]
async fn attempt_count(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let total = state.attempt_service.count().await?;
    Ok(ok(json!({ "totalAttempts": total })))
}

#[get("/api/user/all")]
async fn all_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.user_service.list_users().await?;
    Ok(ok(json!({ "total": users.len(), "users": users })))
}

/// Two-decimal string, e.g. `"66.67"`.
#[get("/api/user/average-score/{phone}")]
async fn average_score(
    state: web::Data<AppState>,
    phone: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let average = state.stats_service.average_score(&phone).await?;
    Ok(ok(json!({ "averageScore": format!("{:.2}", average) })))
}

// Bare array: the participant client reads the body directly.
#[get("/api/user/leaderboard")]
async fn leaderboard(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = state.stats_service.leaderboard().await?;
    Ok(HttpResponse::Ok().json(entries))
}
