use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{Feedback, Quiz},
        dto::{request::FeedbackRequest, response::FeedbackDto},
    },
    repositories::{FeedbackRepository, QuizRepository},
};

pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl FeedbackService {
    pub fn new(repository: Arc<dyn FeedbackRepository>, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            repository,
            quizzes,
        }
    }

    pub async fn submit(&self, request: FeedbackRequest) -> AppResult<Feedback> {
        let input = request.into_feedback()?;
        let feedback = Feedback::new(
            &input.name,
            &input.phone,
            input.quiz_id,
            &input.message,
            input.rating,
        );

        let saved = self.repository.create(feedback).await?;
        log::info!("Feedback {} recorded (rating {})", saved.id, saved.rating);
        Ok(saved)
    }

    /// Newest first, with the referenced quiz title resolved.
    pub async fn list(&self) -> AppResult<Vec<FeedbackDto>> {
        let feedbacks = self.repository.find_all().await?;

        let mut quiz_ids: Vec<String> = feedbacks.iter().filter_map(|f| f.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let quizzes: HashMap<String, Quiz> = self
            .quizzes
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        Ok(feedbacks
            .into_iter()
            .map(|f| {
                let quiz = f.quiz_id.as_ref().and_then(|id| quizzes.get(id));
                FeedbackDto::new(f, quiz)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::repositories::feedback_repository::MockFeedbackRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;

    #[actix_web::test]
    async fn invalid_rating_is_not_stored() {
        let mut repo = MockFeedbackRepository::new();
        repo.expect_create().never();

        let service = FeedbackService::new(Arc::new(repo), Arc::new(MockQuizRepository::new()));
        let result = service
            .submit(FeedbackRequest {
                name: Some("Asha".to_string()),
                phone: Some("9876543210".to_string()),
                quiz_id: None,
                message: Some("Great".to_string()),
                rating: Some(0),
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn listing_resolves_quiz_titles() {
        let quiz = Quiz::new("Geography", None, 5, vec![]);
        let quiz_id = quiz.id.clone();
        let with_quiz = Feedback::new("Asha", "9876543210", Some(quiz_id.clone()), "Fun", 5);
        let orphan = Feedback::new("Ravi", "1234567890", Some("gone".to_string()), "Ok", 3);
        let stored = vec![with_quiz, orphan];

        let mut repo = MockFeedbackRepository::new();
        repo.expect_find_all().returning(move || Ok(stored.clone()));
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![quiz.clone()]));

        let listed = FeedbackService::new(Arc::new(repo), Arc::new(quizzes))
            .list()
            .await
            .expect("listing succeeds");

        assert_eq!(listed[0].quiz.as_ref().map(|q| q.title.as_str()), Some("Geography"));
        assert!(listed[1].quiz.is_none());
    }
}
