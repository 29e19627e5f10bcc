use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AnswerRecord, Feedback, Quiz, QuizAttempt, User};
use crate::models::dto::quiz_dto::QuizRefDto;

/// An attempt with its quiz reference resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "quizId")]
    pub quiz: Option<QuizRefDto>,
    pub name: String,
    pub phone: String,
    pub answers: Vec<AnswerRecord>,
    pub score: i32,
    pub total: i32,
    #[serde(rename = "usedTime", skip_serializing_if = "Option::is_none")]
    pub used_time: Option<i64>,
    #[serde(rename = "attemptedAt")]
    pub attempted_at: DateTime<Utc>,
}

impl AttemptDto {
    pub fn new(attempt: QuizAttempt, quiz: Option<&Quiz>) -> Self {
        AttemptDto {
            id: attempt.id,
            quiz: quiz.map(QuizRefDto::from),
            name: attempt.name,
            phone: attempt.phone,
            answers: attempt.answers,
            score: attempt.score,
            total: attempt.total,
            used_time: attempt.used_time,
            attempted_at: attempt.attempted_at,
        }
    }
}

/// Narrow per-quiz result row: no answer detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResultDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub score: i32,
    #[serde(rename = "attemptedAt")]
    pub attempted_at: DateTime<Utc>,
}

impl From<QuizAttempt> for QuizResultDto {
    fn from(attempt: QuizAttempt) -> Self {
        QuizResultDto {
            id: attempt.id,
            name: attempt.name,
            phone: attempt.phone,
            score: attempt.score,
            attempted_at: attempt.attempted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            phone: user.phone,
            joined_at: user.joined_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
    pub attempts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackQuizDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "quizId")]
    pub quiz: Option<FeedbackQuizDto>,
    pub message: String,
    pub rating: i32,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackDto {
    pub fn new(feedback: Feedback, quiz: Option<&Quiz>) -> Self {
        FeedbackDto {
            id: feedback.id,
            name: feedback.name,
            phone: feedback.phone,
            quiz: quiz.map(|q| FeedbackQuizDto {
                id: q.id.clone(),
                title: q.title.clone(),
            }),
            message: feedback.message,
            rating: feedback.rating,
            submitted_at: feedback.submitted_at,
        }
    }
}

/// Result of a login-or-register call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: String,
    pub created: bool,
}
