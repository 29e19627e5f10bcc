use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        FeedbackRepository, MongoFeedbackRepository, MongoQuizAttemptRepository,
        MongoQuizRepository, MongoUserRepository, QuizAttemptRepository, QuizRepository,
        UserRepository,
    },
    services::{FeedbackService, QuizAttemptService, QuizService, StatsService, UserService},
};

/// The storage backends the services are wired over.
#[derive(Clone)]
pub struct Repositories {
    pub quizzes: Arc<dyn QuizRepository>,
    pub attempts: Arc<dyn QuizAttemptRepository>,
    pub users: Arc<dyn UserRepository>,
    pub feedbacks: Arc<dyn FeedbackRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub user_service: Arc<UserService>,
    pub stats_service: Arc<StatsService>,
    pub feedback_service: Arc<FeedbackService>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(
            &db,
            config.enforce_single_attempt,
        ));
        attempt_repository.ensure_indexes().await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let feedback_repository = Arc::new(MongoFeedbackRepository::new(&db));
        feedback_repository.ensure_indexes().await?;

        let repositories = Repositories {
            quizzes: quiz_repository,
            attempts: attempt_repository,
            users: user_repository,
            feedbacks: feedback_repository,
        };

        let mut state = Self::with_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over arbitrary repositories. No database handle is kept,
    /// so readiness reports the store as unavailable.
    pub fn with_repositories(config: Config, repositories: Repositories) -> Self {
        let Repositories {
            quizzes,
            attempts,
            users,
            feedbacks,
        } = repositories;

        Self {
            quiz_service: Arc::new(QuizService::new(quizzes.clone(), attempts.clone())),
            attempt_service: Arc::new(QuizAttemptService::new(
                quizzes.clone(),
                attempts.clone(),
                config.enforce_single_attempt,
            )),
            user_service: Arc::new(UserService::new(users.clone())),
            stats_service: Arc::new(StatsService::new(attempts, users)),
            feedback_service: Arc::new(FeedbackService::new(feedbacks, quizzes)),
            config: Arc::new(config),
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
