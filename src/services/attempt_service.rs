use crate::dto::quiz_dto::{SubmitQuizRequest, SubmitQuizResponse};
use crate::error::{Error, Result};
use crate::models::attempt::AttemptWithQuiz;
use crate::services::grading_service::GradingService;
use crate::services::quiz_service::QuizService;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AttemptService {
    pool: SqlitePool,
    quizzes: QuizService,
}

impl AttemptService {
    pub fn new(pool: SqlitePool) -> Self {
        let quizzes = QuizService::new(pool.clone());
        Self { pool, quizzes }
    }

    pub async fn submit(
        &self,
        user_id: i64,
        quiz_id: i64,
        req: &SubmitQuizRequest,
    ) -> Result<SubmitQuizResponse> {
        self.submit_at(user_id, quiz_id, req, Utc::now()).await
    }

    /// Scores the submission and stores the attempt as completed at `completed_at`.
    pub async fn submit_at(
        &self,
        user_id: i64,
        quiz_id: i64,
        req: &SubmitQuizRequest,
        completed_at: DateTime<Utc>,
    ) -> Result<SubmitQuizResponse> {
        if self.quizzes.find(quiz_id).await?.is_none() {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        let key = self.quizzes.answer_key(quiz_id).await?;
        let graded = GradingService::grade(&key, &req.answers);

        let attempt_id = sqlx::query(
            r#"
            INSERT INTO quiz_attempts (user_id, quiz_id, score, total_questions, time_taken, completed_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(graded.score)
        .bind(graded.total_questions)
        .bind(req.time_taken)
        .bind(completed_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        tracing::info!(
            attempt_id,
            user_id,
            quiz_id,
            score = graded.score,
            percentage = graded.percentage,
            "quiz attempt recorded"
        );

        Ok(SubmitQuizResponse {
            score: graded.score,
            total_questions: graded.total_questions,
            correct_answers: graded.correct_answers,
            percentage: graded.percentage,
            time_taken: req.time_taken,
            attempt_id,
        })
    }

    pub async fn history(&self, user_id: i64) -> Result<Vec<AttemptWithQuiz>> {
        let attempts = sqlx::query_as::<_, AttemptWithQuiz>(
            r#"
            SELECT qa.id, qa.user_id, qa.quiz_id, qa.score, qa.total_questions,
                   qa.time_taken, qa.completed_at, q.title AS quiz_title
            FROM quiz_attempts qa
            JOIN quizzes q ON qa.quiz_id = q.id
            WHERE qa.user_id = ?
            ORDER BY qa.completed_at DESC, qa.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(attempts)
    }
}
