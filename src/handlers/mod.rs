pub mod admin_handler;
pub mod feedback_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::web;

use crate::errors::AppError;

fn bad_input(err: impl std::fmt::Display) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid request: {}", err)).into()
}

/// Mounts every route. Static segments are registered before their
/// `{param}` siblings so `/all`, `/count` and `/users` are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_input(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_input(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_input(err)));

    cfg.service(health_handler::root)
        .service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready);

    cfg.service(quiz_handler::list_quizzes)
        .service(quiz_handler::quiz_count)
        .service(quiz_handler::get_public_quiz);

    cfg.service(admin_handler::admin_login)
        .service(admin_handler::create_quiz)
        .service(admin_handler::get_quiz)
        .service(admin_handler::update_quiz)
        .service(admin_handler::delete_quiz)
        .service(admin_handler::list_quizzes_with_stats)
        .service(admin_handler::all_results)
        .service(admin_handler::user_results)
        .service(admin_handler::quiz_results);

    cfg.service(user_handler::precheck)
        .service(user_handler::login)
        .service(user_handler::check_attempt)
        .service(user_handler::submit_quiz)
        .service(user_handler::completed_quizzes)
        .service(user_handler::get_attempt)
        .service(user_handler::user_count)
        .service(user_handler::attempt_count)
        .service(user_handler::all_users)
        .service(user_handler::average_score)
        .service(user_handler::leaderboard);

    cfg.service(feedback_handler::submit_feedback)
        .service(feedback_handler::list_feedback);
}
