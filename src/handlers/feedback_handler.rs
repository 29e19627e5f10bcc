use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::FeedbackRequest,
    services::http_helpers::{created, ok},
};

#[post("/api/feedback/submit")]
async fn submit_feedback(
    state: web::Data<AppState>,
    request: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    let feedback = state.feedback_service.submit(request.into_inner()).await?;
    Ok(created(json!({
        "message": "Feedback submitted",
        "feedback": feedback,
    })))
}

#[get("/api/feedback")]
async fn list_feedback(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let feedbacks = state.feedback_service.list().await?;
    Ok(ok(json!({ "feedbacks": feedbacks })))
}
