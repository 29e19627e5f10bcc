use serde::Serialize;

use crate::models::domain::{PublicQuestion, Quiz, QuizAttemptStats, QuizQuestion};

/// Metadata-only listing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummaryDto {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "timeLimit")]
	pub time_limit: i32,
}

impl From<Quiz> for QuizSummaryDto {
	fn from(quiz: Quiz) -> Self {
		QuizSummaryDto {
			id: quiz.id,
			title: quiz.title,
			description: quiz.description,
			time_limit: quiz.time_limit,
		}
	}
}

/// Participant-facing quiz. Built only from [`PublicQuestion`], so answer keys cannot leak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicQuizDto {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "timeLimit")]
	pub time_limit: i32,
	pub questions: Vec<PublicQuestion>,
}

impl From<&Quiz> for PublicQuizDto {
	fn from(quiz: &Quiz) -> Self {
		PublicQuizDto {
			id: quiz.id.clone(),
			title: quiz.title.clone(),
			description: quiz.description.clone(),
			time_limit: quiz.time_limit,
			questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
		}
	}
}

/// Admin listing entry: the full quiz plus attempt statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizWithStatsDto {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "timeLimit")]
	pub time_limit: i32,
	pub questions: Vec<QuizQuestion>,
	#[serde(rename = "totalAttempts")]
	pub total_attempts: i64,
	#[serde(rename = "averageScore")]
	pub average_score: Option<f64>,
	#[serde(rename = "highestScore")]
	pub highest_score: Option<i32>,
}

impl QuizWithStatsDto {
	pub fn new(quiz: Quiz, stats: Option<&QuizAttemptStats>) -> Self {
		let total_attempts = stats.map(|s| s.total_attempts).unwrap_or(0);
		let average_score = if total_attempts > 0 {
			stats.and_then(|s| s.average_score).map(round2)
		} else {
			None
		};

		QuizWithStatsDto {
			id: quiz.id,
			title: quiz.title,
			description: quiz.description,
			time_limit: quiz.time_limit,
			questions: quiz.questions,
			total_attempts,
			average_score,
			highest_score: stats.and_then(|s| s.highest_score),
		}
	}
}

/// Quiz fields joined into attempt views; `null` when the quiz has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRefDto {
	#[serde(rename = "_id")]
	pub id: String,
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "timeLimit")]
	pub time_limit: i32,
}

impl From<&Quiz> for QuizRefDto {
	fn from(quiz: &Quiz) -> Self {
		QuizRefDto {
			id: quiz.id.clone(),
			title: quiz.title.clone(),
			description: quiz.description.clone(),
			time_limit: quiz.time_limit,
		}
	}
}

pub fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}
