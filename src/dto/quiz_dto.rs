use crate::models::question::PublicQuestion;
use crate::models::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    /// Keyed by question id as sent on the wire. Keys that name no question
    /// of the quiz, numeric or not, are ignored when grading.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[validate(range(min = 0, message = "timeTaken must not be negative"))]
    pub time_taken: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub percentage: i64,
    pub time_taken: i64,
    pub attempt_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    #[validate(range(min = 1))]
    pub points: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    #[validate(range(min = 1))]
    pub time_limit: Option<i64>,
    #[validate(nested)]
    pub questions: Vec<CreateQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuizResponse {
    pub id: i64,
    pub message: String,
}
