use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReturnDocument, Collection};

use crate::{
    db::{Database, QUIZZES_COLLECTION},
    errors::AppResult,
    models::domain::{Quiz, QuizChanges},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>>;
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
    /// Returns the updated quiz, or `None` if no quiz has that id.
    async fn update(&self, id: &str, changes: QuizChanges) -> AppResult<Option<Quiz>>;
    /// Returns whether a quiz was removed.
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZZES_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let quizzes = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(quizzes)
    }

    async fn update(&self, id: &str, changes: QuizChanges) -> AppResult<Option<Quiz>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, changes.to_set_document()?)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }
}
