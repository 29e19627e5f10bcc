use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, FEEDBACKS_COLLECTION},
    errors::AppResult,
    models::domain::Feedback,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: Feedback) -> AppResult<Feedback>;
    /// All feedback, newest first.
    async fn find_all(&self) -> AppResult<Vec<Feedback>>;
}

pub struct MongoFeedbackRepository {
    collection: Collection<Feedback>,
}

impl MongoFeedbackRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(FEEDBACKS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", FEEDBACKS_COLLECTION);

        let submitted_index = IndexModel::builder()
            .keys(doc! { "submittedAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("submitted_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(submitted_index).await?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for MongoFeedbackRepository {
    async fn create(&self, feedback: Feedback) -> AppResult<Feedback> {
        self.collection.insert_one(&feedback).await?;
        Ok(feedback)
    }

    async fn find_all(&self) -> AppResult<Vec<Feedback>> {
        let feedbacks = self
            .collection
            .find(doc! {})
            .sort(doc! { "submittedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(feedbacks)
    }
}
