pub mod feedback_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod user_repository;

pub use feedback_repository::{FeedbackRepository, MongoFeedbackRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
