pub mod feedback_service;
pub mod http_helpers;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod stats_service;
pub mod user_service;

pub use feedback_service::FeedbackService;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use stats_service::StatsService;
pub use user_service::UserService;
