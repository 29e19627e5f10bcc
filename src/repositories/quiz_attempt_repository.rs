use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, ATTEMPTS_COLLECTION},
    errors::AppResult,
    models::domain::{QuizAttempt, QuizAttemptStats, ScoreTotals},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// Inserts an attempt. Stores that enforce one attempt per (quiz, phone)
    /// report a duplicate as `AppError::Conflict`.
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn exists(&self, name: &str, phone: &str, quiz_id: &str) -> AppResult<bool>;
    async fn find_all(&self) -> AppResult<Vec<QuizAttempt>>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>>;
    /// Exact match on both name and phone.
    async fn find_by_identity(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>>;
    /// Case-insensitive whole-name match, exact phone.
    async fn find_by_name_ignore_case(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>>;
    async fn count(&self) -> AppResult<u64>;
    async fn score_totals_for_phone(&self, phone: &str) -> AppResult<Option<ScoreTotals>>;
    async fn score_totals_by_phone(&self) -> AppResult<Vec<ScoreTotals>>;
    async fn stats_by_quiz(&self) -> AppResult<Vec<QuizAttemptStats>>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
    single_attempt: bool,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database, single_attempt: bool) -> Self {
        let collection = db.get_collection(ATTEMPTS_COLLECTION);
        Self {
            collection,
            single_attempt,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", ATTEMPTS_COLLECTION);

        let quiz_phone_index = IndexModel::builder()
            .keys(doc! { "quizId": 1, "phone": 1 })
            .options(
                IndexOptions::builder()
                    .unique(self.single_attempt)
                    .name(if self.single_attempt {
                        "quiz_phone_unique".to_string()
                    } else {
                        "quiz_phone".to_string()
                    })
                    .build(),
            )
            .build();

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(IndexOptions::builder().name("phone".to_string()).build())
            .build();

        self.collection.create_index(quiz_phone_index).await?;
        self.collection.create_index(phone_index).await?;

        log::info!("Successfully created indexes for {} collection", ATTEMPTS_COLLECTION);
        Ok(())
    }

    async fn aggregate_into<T>(&self, pipeline: Vec<Document>) -> AppResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|d| bson::from_document(d).map_err(Into::into))
            .collect()
    }
}

fn totals_group_stage() -> Document {
    doc! {
        "$group": {
            "_id": "$phone",
            "totalScore": { "$sum": "$score" },
            "totalPossible": { "$sum": "$total" },
            "attempts": { "$sum": 1 },
        }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(attempt)
    }

    async fn exists(&self, name: &str, phone: &str, quiz_id: &str) -> AppResult<bool> {
        let attempt = self
            .collection
            .find_one(doc! { "name": name, "phone": phone, "quizId": quiz_id })
            .await?;
        Ok(attempt.is_some())
    }

    async fn find_all(&self) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! {})
            .sort(doc! { "attemptedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "quizId": quiz_id })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_identity(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "name": name, "phone": phone })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_name_ignore_case(&self, name: &str, phone: &str) -> AppResult<Vec<QuizAttempt>> {
        let pattern = format!("^{}$", regex::escape(name));
        let attempts = self
            .collection
            .find(doc! {
                "name": { "$regex": pattern, "$options": "i" },
                "phone": phone,
            })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn count(&self) -> AppResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }

    async fn score_totals_for_phone(&self, phone: &str) -> AppResult<Option<ScoreTotals>> {
        let pipeline = vec![doc! { "$match": { "phone": phone } }, totals_group_stage()];
        let mut totals: Vec<ScoreTotals> = self.aggregate_into(pipeline).await?;
        Ok(totals.pop())
    }

    async fn score_totals_by_phone(&self) -> AppResult<Vec<ScoreTotals>> {
        self.aggregate_into(vec![totals_group_stage()]).await
    }

    async fn stats_by_quiz(&self) -> AppResult<Vec<QuizAttemptStats>> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": "$quizId",
                "totalAttempts": { "$sum": 1 },
                "averageScore": { "$avg": "$score" },
                "highestScore": { "$max": "$score" },
            }
        }];
        self.aggregate_into(pipeline).await
    }
}
