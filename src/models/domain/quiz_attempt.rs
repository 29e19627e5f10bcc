use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One participant's submission for one quiz. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    pub name: String,
    pub phone: String,
    pub answers: Vec<AnswerRecord>,
    pub score: i32,
    pub total: i32,
    #[serde(rename = "usedTime", default, skip_serializing_if = "Option::is_none")]
    pub used_time: Option<i64>, // seconds
    #[serde(rename = "attemptedAt")]
    pub attempted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    #[serde(rename = "questionText")]
    pub question_text: String,
    #[serde(rename = "userAnswer")]
    pub user_answer: Option<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl QuizAttempt {
    pub fn new(
        quiz_id: &str,
        name: &str,
        phone: &str,
        answers: Vec<AnswerRecord>,
        score: i32,
        total: i32,
        used_time: Option<i64>,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            answers,
            score,
            total,
            used_time,
            attempted_at: Utc::now(),
        }
    }
}

/// Score sums for one phone number, as produced by the `$group` stage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreTotals {
    #[serde(rename = "_id")]
    pub phone: String,
    #[serde(rename = "totalScore")]
    pub total_score: i64,
    #[serde(rename = "totalPossible")]
    pub total_possible: i64,
    pub attempts: i64,
}

/// Per-quiz attempt statistics. Scores are raw correct-answer counts.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttemptStats {
    #[serde(rename = "_id")]
    pub quiz_id: String,
    #[serde(rename = "totalAttempts")]
    pub total_attempts: i64,
    #[serde(rename = "averageScore")]
    pub average_score: Option<f64>,
    #[serde(rename = "highestScore")]
    pub highest_score: Option<i32>,
}
