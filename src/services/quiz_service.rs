use crate::dto::quiz_dto::{CreateQuizPayload, QuizWithQuestions};
use crate::error::{Error, Result};
use crate::models::question::{AnswerKey, AnswerOption, PublicQuestion};
use crate::models::quiz::Quiz;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct QuizService {
    pool: SqlitePool,
}

impl QuizService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a quiz and its questions in one transaction. Every question must
    /// name one of the four options as correct.
    pub async fn create(&self, payload: &CreateQuizPayload, created_by: i64) -> Result<i64> {
        let mut checked = Vec::with_capacity(payload.questions.len());
        for (idx, q) in payload.questions.iter().enumerate() {
            let correct: AnswerOption = q
                .correct_answer
                .parse()
                .map_err(|e| Error::BadRequest(format!("question {}: {}", idx + 1, e)))?;
            checked.push((q, correct));
        }

        let mut tx = self.pool.begin().await?;
        let quiz_id = sqlx::query(
            r#"
            INSERT INTO quizzes (title, description, category, difficulty, time_limit, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(&payload.difficulty)
        .bind(payload.time_limit)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for (q, correct) in checked {
            sqlx::query(
                r#"
                INSERT INTO questions (quiz_id, question, option_a, option_b, option_c, option_d, correct_answer, points)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(quiz_id)
            .bind(&q.question)
            .bind(&q.option_a)
            .bind(&q.option_b)
            .bind(&q.option_c)
            .bind(&q.option_d)
            .bind(correct)
            .bind(q.points.unwrap_or(1))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(quiz_id, created_by, "quiz created");
        Ok(quiz_id)
    }

    pub async fn find(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, category, difficulty, time_limit, created_by, created_at
            FROM quizzes
            WHERE id = ?
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quiz)
    }

    pub async fn get_public(&self, quiz_id: i64) -> Result<QuizWithQuestions> {
        let quiz = self
            .find(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        let questions = sqlx::query_as::<_, PublicQuestion>(
            r#"
            SELECT id, question, option_a, option_b, option_c, option_d, points
            FROM questions
            WHERE quiz_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(QuizWithQuestions { quiz, questions })
    }

    pub async fn answer_key(&self, quiz_id: i64) -> Result<Vec<AnswerKey>> {
        let key = sqlx::query_as::<_, AnswerKey>(
            r#"
            SELECT id, correct_answer, points
            FROM questions
            WHERE quiz_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(key)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quizzes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
