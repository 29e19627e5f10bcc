pub mod feedback;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod user;
pub use feedback::Feedback;
pub use quiz::{Quiz, QuizChanges};
pub use quiz_attempt::{AnswerRecord, QuizAttempt, QuizAttemptStats, ScoreTotals};
pub use quiz_question::{PublicQuestion, QuizQuestion};
pub use user::User;
