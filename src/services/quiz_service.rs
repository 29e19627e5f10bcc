use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizAttemptStats},
        dto::{
            quiz_dto::{PublicQuizDto, QuizSummaryDto, QuizWithStatsDto},
            request::{CreateQuizRequest, UpdateQuizRequest},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, attempts: Arc<dyn QuizAttemptRepository>) -> Self {
        Self {
            repository,
            attempts,
        }
    }

    pub async fn list_summaries(&self) -> AppResult<Vec<QuizSummaryDto>> {
        let quizzes = self.repository.find_all().await?;
        Ok(quizzes.into_iter().map(QuizSummaryDto::from).collect())
    }

    /// Participant view. Answer keys are stripped.
    pub async fn get_public_quiz(&self, id: &str) -> AppResult<PublicQuizDto> {
        let quiz = self.get_quiz(id).await?;
        Ok(PublicQuizDto::from(&quiz))
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        let (title, description, time_limit, questions) = request.into_parts()?;
        let quiz = Quiz::new(&title, description, time_limit, questions);
        warn_on_unmatched_answers(&quiz);

        let quiz = self.repository.create(quiz).await?;
        log::info!("Created quiz {} ({} questions)", quiz.id, quiz.question_count());
        Ok(quiz)
    }

    /// Partial update; fields absent from the request are left untouched.
    pub async fn update_quiz(&self, id: &str, request: UpdateQuizRequest) -> AppResult<Quiz> {
        let changes = request.into_changes()?;

        let quiz = self
            .repository
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        warn_on_unmatched_answers(&quiz);
        log::info!("Updated quiz {}", quiz.id);
        Ok(quiz)
    }

    /// Attempts referencing the quiz are kept.
    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }
        log::info!("Deleted quiz {}", id);
        Ok(())
    }

    pub async fn list_with_stats(&self) -> AppResult<Vec<QuizWithStatsDto>> {
        let quizzes = self.repository.find_all().await?;
        let stats: HashMap<String, QuizAttemptStats> = self
            .attempts
            .stats_by_quiz()
            .await?
            .into_iter()
            .map(|s| (s.quiz_id.clone(), s))
            .collect();

        Ok(quizzes
            .into_iter()
            .map(|quiz| {
                let quiz_stats = stats.get(&quiz.id);
                QuizWithStatsDto::new(quiz, quiz_stats)
            })
            .collect())
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.repository.count().await
    }
}

fn warn_on_unmatched_answers(quiz: &Quiz) {
    for (index, question) in quiz.questions.iter().enumerate() {
        if !question.has_matching_option() {
            log::warn!(
                "Quiz {} question {} has a correct answer that matches none of its options",
                quiz.id,
                index + 1
            );
        }
    }
}
