use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, USERS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>>;
    async fn find_by_phones(&self, phones: &[String]) -> AppResult<Vec<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn update_firebase_uid(&self, id: &str, firebase_uid: &str) -> AppResult<()>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("phone_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on users.phone");

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "phone": phone }).await?;
        Ok(user)
    }

    async fn find_by_phones(&self, phones: &[String]) -> AppResult<Vec<User>> {
        if phones.is_empty() {
            return Ok(Vec::new());
        }

        let users = self
            .collection
            .find(doc! { "phone": { "$in": phones.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update_firebase_uid(&self, id: &str, firebase_uid: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "firebaseUid": firebase_uid } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("User with id '{}' not found", id)));
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }
}
