use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feedback {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(rename = "quizId", default)]
    pub quiz_id: Option<String>,
    pub message: String,
    pub rating: i32,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(name: &str, phone: &str, quiz_id: Option<String>, message: &str, rating: i32) -> Self {
        Feedback {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            quiz_id,
            message: message.to_string(),
            rating,
            submitted_at: Utc::now(),
        }
    }
}
