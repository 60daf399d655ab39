use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// One of the four option slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "a",
            AnswerOption::B => "b",
            AnswerOption::C => "c",
            AnswerOption::D => "d",
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(AnswerOption::A),
            "b" => Ok(AnswerOption::B),
            "c" => Ok(AnswerOption::C),
            "d" => Ok(AnswerOption::D),
            other => Err(format!("correct answer must be one of a, b, c, d (got {:?})", other)),
        }
    }
}

/// Question as shown to a quiz taker: no correct answer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub points: i64,
}

/// Scoring input for one question.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AnswerKey {
    #[sqlx(rename = "id")]
    pub question_id: i64,
    pub correct_answer: AnswerOption,
    pub points: i64,
}
