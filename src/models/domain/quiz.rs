use mongodb::bson::{self, doc, Document};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::domain::quiz_question::QuizQuestion;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "timeLimit")]
    pub time_limit: i32, // minutes
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: Option<String>,
        time_limit: i32,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            time_limit,
            questions,
        }
    }

    pub fn question_count(&self) -> i32 {
        self.questions.len() as i32
    }
}

/// Fields an admin may replace on an existing quiz. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_limit: Option<i32>,
    pub questions: Option<Vec<QuizQuestion>>,
}

impl QuizChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.time_limit.is_none()
            && self.questions.is_none()
    }

    pub fn apply(&self, quiz: &mut Quiz) {
        if let Some(title) = &self.title {
            quiz.title = title.clone();
        }
        if let Some(description) = &self.description {
            quiz.description = Some(description.clone());
        }
        if let Some(time_limit) = self.time_limit {
            quiz.time_limit = time_limit;
        }
        if let Some(questions) = &self.questions {
            quiz.questions = questions.clone();
        }
    }

    /// `$set` document for the provided fields, using the stored field names.
    pub fn to_set_document(&self) -> AppResult<Document> {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        if let Some(time_limit) = self.time_limit {
            set.insert("timeLimit", time_limit);
        }
        if let Some(questions) = &self.questions {
            set.insert("questions", bson::to_bson(questions)?);
        }
        Ok(doc! { "$set": set })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    fn sample_quiz() -> Quiz {
        Quiz::new(
            "Capitals",
            Some("European capitals".to_string()),
            10,
            vec![
                QuizQuestion::new("France?", vec!["Paris".into(), "Rome".into()], "Paris"),
                QuizQuestion::new("Italy?", vec!["Paris".into(), "Rome".into()], "Rome"),
            ],
        )
    }

    #[test]
    fn quiz_round_trip_preserves_question_order() {
        let quiz = sample_quiz();
        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(parsed, quiz);
        assert_eq!(parsed.questions[0].question, "France?");
        assert_eq!(parsed.questions[1].question, "Italy?");
        assert!(json.contains("\"timeLimit\":10"));
    }

    #[test]
    fn partial_changes_only_touch_provided_fields() {
        let mut quiz = sample_quiz();
        let changes = QuizChanges {
            title: Some("Capitals II".to_string()),
            ..Default::default()
        };

        changes.apply(&mut quiz);

        assert_eq!(quiz.title, "Capitals II");
        assert_eq!(quiz.time_limit, 10);
        assert_eq!(quiz.questions.len(), 2);
    }

    #[test]
    fn set_document_uses_stored_field_names() {
        let changes = QuizChanges {
            time_limit: Some(15),
            questions: Some(vec![QuizQuestion::new("Q", vec!["A".into()], "A")]),
            ..Default::default()
        };

        let update = changes.to_set_document().expect("set document should build");
        let set = update.get_document("$set").expect("$set present");

        assert_eq!(set.get("timeLimit"), Some(&Bson::Int32(15)));
        assert!(set.contains_key("questions"));
        assert!(!set.contains_key("title"));
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(QuizChanges::default().is_empty());
        assert!(!QuizChanges {
            description: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
