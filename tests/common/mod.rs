#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdesk_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Feedback, Quiz, QuizAttempt, QuizAttemptStats, QuizChanges, QuizQuestion, ScoreTotals,
        User,
    },
    repositories::{FeedbackRepository, QuizAttemptRepository, QuizRepository, UserRepository},
};

pub const ADMIN_SECRET: &str = "test_admin_password";

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes.write().await.push(quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().filter(|q| ids.contains(&q.id)).cloned().collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        Ok(self.quizzes.read().await.clone())
    }

    async fn update(&self, id: &str, changes: QuizChanges) -> AppResult<Option<Quiz>> {
        let mut quizzes = self.quizzes.write().await;
        Ok(quizzes.iter_mut().find(|q| q.id == id).map(|quiz| {
            changes.apply(quiz);
            quiz.clone()
        }))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        Ok(quizzes.len() != before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.quizzes.read().await.len() as u64)
    }
}

/// Mirrors the Mongo store, including the optional unique (quizId, phone) index.
#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: RwLock<Vec<QuizAttempt>>,
    unique_per_quiz_phone: bool,
}

impl InMemoryAttemptRepository {
    pub fn new(unique_per_quiz_phone: bool) -> Self {
        Self {
            attempts: RwLock::new(Vec::new()),
            unique_per_quiz_phone,
        }
    }

    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }

    fn totals<'a>(attempts: impl Iterator<Item = &'a QuizAttempt>) -> Vec<ScoreTotals> {
        let mut by_phone: Vec<ScoreTotals> = Vec::new();
        for attempt in attempts {
            match by_phone.iter_mut().find(|t| t.phone == attempt.phone) {
                Some(t) => {
                    t.total_score += attempt.score as i64;
                    t.total_possible += attempt.total as i64;
                    t.attempts += 1;
                }
                None => by_phone.push(ScoreTotals {
                    phone: attempt.phone.clone(),
                    total_score: attempt.score as i64,
                    total_possible: attempt.total as i64,
                    attempts: 1,
                }),
            }
        }
        by_phone
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        if self.unique_per_quiz_phone
            && attempts
                .iter()
                .any(|a| a.quiz_id == attempt.quiz_id && a.phone == attempt.phone)
        {
            return Err(AppError::Conflict("Duplicate record".to_string()));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().find(|a| a.id == id).cloned())
    }

    async fn exists(&self, name: &str, phone: &str, quiz_id: &str) -> AppResult<bool> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .any(|a| a.name == name && a.phone == phone && a.quiz_id == quiz_id))
    }

    async fn find_all(&self) -> AppResult<Vec<QuizAttempt>> {
        let mut attempts = self.attempts.read().await.clone();
        attempts.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at));
        Ok(attempts)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().filter(|a| a.quiz_id == quiz_id).cloned().collect())
    }

    async fn find_by_identity(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.name == name && a.phone == phone)
            .cloned()
            .collect())
    }

    async fn find_by_name_ignore_case(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.name.to_lowercase() == name.to_lowercase() && a.phone == phone)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.attempts.read().await.len() as u64)
    }

    async fn score_totals_for_phone(&self, phone: &str) -> AppResult<Option<ScoreTotals>> {
        let attempts = self.attempts.read().await;
        Ok(Self::totals(attempts.iter().filter(|a| a.phone == phone)).pop())
    }

    async fn score_totals_by_phone(&self) -> AppResult<Vec<ScoreTotals>> {
        let attempts = self.attempts.read().await;
        Ok(Self::totals(attempts.iter()))
    }

    async fn stats_by_quiz(&self) -> AppResult<Vec<QuizAttemptStats>> {
        let attempts = self.attempts.read().await;
        let mut grouped: HashMap<String, Vec<i32>> = HashMap::new();
        for attempt in attempts.iter() {
            grouped
                .entry(attempt.quiz_id.clone())
                .or_default()
                .push(attempt.score);
        }

        Ok(grouped
            .into_iter()
            .map(|(quiz_id, scores)| QuizAttemptStats {
                quiz_id,
                total_attempts: scores.len() as i64,
                average_score: Some(scores.iter().sum::<i32>() as f64 / scores.len() as f64),
                highest_score: scores.iter().copied().max(),
            })
            .collect())
    }
}

/// Enforces the unique phone index under the write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.phone == user.phone) {
            return Err(AppError::Conflict("Duplicate record".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_phones(&self, phones: &[String]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| phones.contains(&u.phone)).cloned().collect())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn update_firebase_uid(&self, id: &str, firebase_uid: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;
        user.firebase_uid = Some(firebase_uid.to_string());
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    feedbacks: RwLock<Vec<Feedback>>,
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn create(&self, feedback: Feedback) -> AppResult<Feedback> {
        self.feedbacks.write().await.push(feedback.clone());
        Ok(feedback)
    }

    async fn find_all(&self) -> AppResult<Vec<Feedback>> {
        let mut feedbacks = self.feedbacks.read().await.clone();
        feedbacks.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(feedbacks)
    }
}

/// Services over in-memory stores, with handles kept for direct inspection.
pub struct TestContext {
    pub state: AppState,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub attempts: Arc<InMemoryAttemptRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub feedbacks: Arc<InMemoryFeedbackRepository>,
}

pub fn test_context(single_attempt: bool) -> TestContext {
    let mut config = Config::test_config();
    config.enforce_single_attempt = single_attempt;

    let quizzes = Arc::new(InMemoryQuizRepository::default());
    let attempts = Arc::new(InMemoryAttemptRepository::new(single_attempt));
    let users = Arc::new(InMemoryUserRepository::default());
    let feedbacks = Arc::new(InMemoryFeedbackRepository::default());

    let state = AppState::with_repositories(
        config,
        Repositories {
            quizzes: quizzes.clone(),
            attempts: attempts.clone(),
            users: users.clone(),
            feedbacks: feedbacks.clone(),
        },
    );

    TestContext {
        state,
        quizzes,
        attempts,
        users,
        feedbacks,
    }
}

/// A quiz whose questions each offer A/B/C with the given answer keys.
pub fn letters_quiz(title: &str, keys: &[&str]) -> Quiz {
    let questions = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            QuizQuestion::new(
                &format!("Question {}", i + 1),
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                key,
            )
        })
        .collect();
    Quiz::new(title, Some(format!("{} quiz", title)), 5, questions)
}

pub async fn seed_quiz(ctx: &TestContext, title: &str, keys: &[&str]) -> Quiz {
    ctx.quizzes
        .create(letters_quiz(title, keys))
        .await
        .expect("in-memory insert succeeds")
}
