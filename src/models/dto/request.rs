use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::AppResult;
use crate::models::domain::{QuizChanges, QuizQuestion};

pub static PHONE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[0-9]{10}$").expect("PHONE_REGEX is a valid regex pattern")
});

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn positive_minutes(value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new("time_limit"));
    }
    Ok(())
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionInput {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[validate(
        required(message = "Every question needs text"),
        custom(function = not_blank, message = "Every question needs text")
    )]
    pub question: Option<String>,

    #[serde(default)]
    pub options: Vec<String>,

    #[serde(rename = "correctAnswer")]
    #[validate(
        required(message = "Every question needs a correct answer"),
        custom(function = not_blank, message = "Every question needs a correct answer")
    )]
    pub correct_answer: Option<String>,
}

impl QuestionInput {
    /// Keeps an existing question id so edits do not churn identifiers.
    pub fn into_question(self) -> QuizQuestion {
        let mut question = QuizQuestion::new(
            &trimmed(self.question),
            self.options,
            &self.correct_answer.unwrap_or_default(),
        );
        if let Some(id) = self.id.filter(|id| !id.trim().is_empty()) {
            question.id = id;
        }
        question
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(
        required(message = "Quiz title is required"),
        custom(function = not_blank, message = "Quiz title is required")
    )]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "timeLimit")]
    #[validate(
        required(message = "Time limit is required"),
        custom(function = positive_minutes, message = "Time limit must be a positive number of minutes")
    )]
    pub time_limit: Option<i32>,

    #[validate(required(message = "Questions must be provided as a list"), nested)]
    pub questions: Option<Vec<QuestionInput>>,
}

impl CreateQuizRequest {
    pub fn into_parts(self) -> AppResult<(String, Option<String>, i32, Vec<QuizQuestion>)> {
        self.validate()?;
        let questions = self
            .questions
            .unwrap_or_default()
            .into_iter()
            .map(QuestionInput::into_question)
            .collect();
        Ok((
            trimmed(self.title),
            self.description,
            self.time_limit.unwrap_or_default(),
            questions,
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(custom(function = not_blank, message = "Quiz title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "timeLimit")]
    #[validate(custom(function = positive_minutes, message = "Time limit must be a positive number of minutes"))]
    pub time_limit: Option<i32>,

    #[validate(nested)]
    pub questions: Option<Vec<QuestionInput>>,
}

impl UpdateQuizRequest {
    pub fn into_changes(self) -> AppResult<QuizChanges> {
        self.validate()?;
        Ok(QuizChanges {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            time_limit: self.time_limit,
            questions: self
                .questions
                .map(|qs| qs.into_iter().map(QuestionInput::into_question).collect()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    #[serde(rename = "questionText", default)]
    pub question_text: Option<String>,
    #[serde(rename = "userAnswer", default)]
    pub user_answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(
        required(message = "Name is required"),
        custom(function = not_blank, message = "Name is required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Phone is required"),
        custom(function = not_blank, message = "Phone is required")
    )]
    pub phone: Option<String>,

    #[validate(required(message = "Answers must be provided as a list"))]
    pub answers: Option<Vec<SubmittedAnswer>>,

    #[serde(rename = "usedTime")]
    #[validate(range(min = 0, message = "Used time cannot be negative"))]
    pub used_time: Option<i64>,
}

/// A validated submission, ready to be scored.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub answers: Vec<SubmittedAnswer>,
    pub used_time: Option<i64>,
}

impl SubmitAttemptRequest {
    pub fn into_submission(self) -> AppResult<Submission> {
        self.validate()?;
        Ok(Submission {
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            answers: self.answers.unwrap_or_default(),
            used_time: self.used_time,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckAttemptRequest {
    #[validate(required(message = "Name, phone and quizId are required"), length(min = 1, message = "Name, phone and quizId are required"))]
    pub name: Option<String>,

    #[validate(required(message = "Name, phone and quizId are required"), length(min = 1, message = "Name, phone and quizId are required"))]
    pub phone: Option<String>,

    #[serde(rename = "quizId")]
    #[validate(required(message = "Name, phone and quizId are required"), length(min = 1, message = "Name, phone and quizId are required"))]
    pub quiz_id: Option<String>,
}

impl CheckAttemptRequest {
    pub fn into_parts(self) -> AppResult<(String, String, String)> {
        self.validate()?;
        Ok((
            self.name.unwrap_or_default(),
            self.phone.unwrap_or_default(),
            self.quiz_id.unwrap_or_default(),
        ))
    }
}

/// Name and phone pair used by the lookup endpoints (query string).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdentityQuery {
    #[validate(required(message = "Name and phone required"), length(min = 1, message = "Name and phone required"))]
    pub name: Option<String>,

    #[validate(required(message = "Name and phone required"), length(min = 1, message = "Name and phone required"))]
    pub phone: Option<String>,
}

impl IdentityQuery {
    pub fn into_pair(self) -> AppResult<(String, String)> {
        self.validate()?;
        Ok((self.name.unwrap_or_default(), self.phone.unwrap_or_default()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PrecheckRequest {
    #[validate(
        required(message = "Name and phone required"),
        custom(function = not_blank, message = "Name and phone required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Name and phone required"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number format")
    )]
    pub phone: Option<String>,
}

impl PrecheckRequest {
    pub fn into_pair(self) -> AppResult<(String, String)> {
        self.validate()?;
        Ok((trimmed(self.name), self.phone.unwrap_or_default()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Name, phone, and firebase UID required"),
        custom(function = not_blank, message = "Name, phone, and firebase UID required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Name, phone, and firebase UID required"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number format")
    )]
    pub phone: Option<String>,

    #[serde(rename = "firebaseUid")]
    #[validate(
        required(message = "Name, phone, and firebase UID required"),
        custom(function = not_blank, message = "Name, phone, and firebase UID required")
    )]
    pub firebase_uid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Login {
    pub name: String,
    pub phone: String,
    pub firebase_uid: String,
}

impl LoginRequest {
    pub fn into_login(self) -> AppResult<Login> {
        self.validate()?;
        Ok(Login {
            name: trimmed(self.name),
            phone: self.phone.unwrap_or_default(),
            firebase_uid: self.firebase_uid.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(
        required(message = "Name, phone, message, and rating are required."),
        custom(function = not_blank, message = "Name, phone, message, and rating are required.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Name, phone, message, and rating are required."),
        custom(function = not_blank, message = "Name, phone, message, and rating are required.")
    )]
    pub phone: Option<String>,

    #[serde(rename = "quizId")]
    pub quiz_id: Option<String>,

    #[validate(
        required(message = "Name, phone, message, and rating are required."),
        custom(function = not_blank, message = "Name, phone, message, and rating are required.")
    )]
    pub message: Option<String>,

    #[validate(
        required(message = "Name, phone, message, and rating are required."),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    pub rating: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub phone: String,
    pub quiz_id: Option<String>,
    pub message: String,
    pub rating: i32,
}

impl FeedbackRequest {
    pub fn into_feedback(self) -> AppResult<NewFeedback> {
        self.validate()?;
        Ok(NewFeedback {
            name: trimmed(self.name),
            phone: trimmed(self.phone),
            quiz_id: self.quiz_id.filter(|id| !id.trim().is_empty()),
            message: self.message.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(required(message = "Password required"), length(min = 1, message = "Password required"))]
    pub password: Option<String>,
}
