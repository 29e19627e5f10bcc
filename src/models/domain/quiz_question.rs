use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question embedded in a quiz. Its position in the quiz is what scoring pairs on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn new(question: &str, options: Vec<String>, correct_answer: &str) -> Self {
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            options,
            correct_answer: correct_answer.to_string(),
        }
    }

    pub fn has_matching_option(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }
}

/// Participant-facing view of a question with the answer key removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublicQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for PublicQuestion {
    fn from(question: &QuizQuestion) -> Self {
        PublicQuestion {
            id: question.id.clone(),
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}
