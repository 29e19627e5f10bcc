use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, Quiz, QuizAttempt};
use crate::models::dto::request::{
    CheckAttemptRequest, IdentityQuery, SubmitAttemptRequest, SubmittedAnswer,
};
use crate::models::dto::response::{AttemptDto, QuizResultDto};
use crate::repositories::{QuizAttemptRepository, QuizRepository};

/// Outcome of scoring one submission against a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAttempt {
    pub records: Vec<AnswerRecord>,
    pub score: i32,
    pub total: i32,
}

/// Scores answers positionally: the i-th answer is checked against the i-th question.
///
/// The loop is bounded by the quiz, so surplus answers are ignored and missing
/// answers are incorrect. Comparison is exact and case-sensitive.
pub fn grade_attempt(quiz: &Quiz, answers: &[SubmittedAnswer]) -> GradedAttempt {
    let records: Vec<AnswerRecord> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = answers.get(index).and_then(|a| a.user_answer.clone());
            let is_correct = !question.correct_answer.is_empty()
                && user_answer.as_deref() == Some(question.correct_answer.as_str());

            AnswerRecord {
                question_text: question.question.clone(),
                user_answer,
                correct_answer: question.correct_answer.clone(),
                is_correct,
            }
        })
        .collect();

    let score = records.iter().filter(|r| r.is_correct).count() as i32;

    GradedAttempt {
        records,
        score,
        total: quiz.question_count(),
    }
}

pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    single_attempt: bool,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        single_attempt: bool,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            single_attempt,
        }
    }

    /// Scores a submission and persists it as a single insert.
    pub async fn submit(&self, quiz_id: &str, request: SubmitAttemptRequest) -> AppResult<QuizAttempt> {
        let submission = request.into_submission()?;

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        if self.single_attempt
            && self
                .attempts
                .exists(&submission.name, &submission.phone, quiz_id)
                .await?
        {
            return Err(AppError::Conflict("Quiz already attempted".to_string()));
        }

        let graded = grade_attempt(&quiz, &submission.answers);
        let attempt = QuizAttempt::new(
            &quiz.id,
            &submission.name,
            &submission.phone,
            graded.records,
            graded.score,
            graded.total,
            submission.used_time,
        );

        let saved = self.attempts.create(attempt).await.map_err(|err| match err {
            AppError::Conflict(_) => AppError::Conflict("Quiz already attempted".to_string()),
            other => other,
        })?;

        log::info!(
            "Attempt {} submitted for quiz {}: {}/{}",
            saved.id,
            saved.quiz_id,
            saved.score,
            saved.total
        );
        Ok(saved)
    }

    /// Advisory check only; it does not reserve anything.
    pub async fn has_attempted(&self, request: CheckAttemptRequest) -> AppResult<bool> {
        let (name, phone, quiz_id) = request.into_parts()?;
        self.attempts.exists(&name, &phone, &quiz_id).await
    }

    pub async fn completed_quiz_ids(&self, query: IdentityQuery) -> AppResult<Vec<String>> {
        let (name, phone) = query.into_pair()?;
        let attempts = self.attempts.find_by_identity(&name, &phone).await?;

        let mut ids: Vec<String> = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            if !ids.contains(&attempt.quiz_id) {
                ids.push(attempt.quiz_id);
            }
        }
        Ok(ids)
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<AttemptDto> {
        let attempt = self
            .attempts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Attempt not found".to_string()))?;

        let quiz = self.quizzes.find_by_id(&attempt.quiz_id).await?;
        Ok(AttemptDto::new(attempt, quiz.as_ref()))
    }

    pub async fn all_attempts(&self) -> AppResult<Vec<AttemptDto>> {
        let attempts = self.attempts.find_all().await?;
        self.with_quizzes(attempts).await
    }

    pub async fn results_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResultDto>> {
        let attempts = self.attempts.find_by_quiz(quiz_id).await?;
        Ok(attempts.into_iter().map(QuizResultDto::from).collect())
    }

    pub async fn results_for_user(&self, query: IdentityQuery) -> AppResult<Vec<AttemptDto>> {
        let (name, phone) = query.into_pair()?;
        let attempts = self
            .attempts
            .find_by_name_ignore_case(name.trim(), phone.trim())
            .await?;

        if attempts.is_empty() {
            return Err(AppError::NotFound("No attempts found".to_string()));
        }
        self.with_quizzes(attempts).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.attempts.count().await
    }

    /// Resolves quiz references; deleted quizzes resolve to `None`.
    async fn with_quizzes(&self, attempts: Vec<QuizAttempt>) -> AppResult<Vec<AttemptDto>> {
        let mut quiz_ids: Vec<String> = attempts.iter().map(|a| a.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let quizzes: HashMap<String, Quiz> = self
            .quizzes
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        Ok(attempts
            .into_iter()
            .map(|attempt| {
                let quiz = quizzes.get(&attempt.quiz_id);
                AttemptDto::new(attempt, quiz)
            })
            .collect())
    }
}
