//! Community Q&A repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::question::{Answer, CreateAnswer, CreateQuestion, Question, QuestionSummary},
};

#[derive(Clone)]
pub struct QuestionsRepository {
    pool: Pool<Postgres>,
}

impl QuestionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Question> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Question with id {} not found", id)))
    }

    /// List questions, newest first, with answer counts
    pub async fn list(&self) -> AppResult<Vec<QuestionSummary>> {
        let questions = sqlx::query_as::<_, QuestionSummary>(
            r#"
            SELECT q.id, q.author_id, q.title, q.created_at,
                   COUNT(a.id) AS answer_count
            FROM questions q
            LEFT JOIN answers a ON a.question_id = q.id
            GROUP BY q.id
            ORDER BY q.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn create(&self, question: &CreateQuestion, author_id: i32) -> AppResult<Question> {
        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (author_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(author_id)
        .bind(&question.title)
        .bind(&question.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Answers to a question, oldest first
    pub async fn answers(&self, question_id: i32) -> AppResult<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT * FROM answers WHERE question_id = $1 ORDER BY created_at",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    pub async fn create_answer(
        &self,
        question_id: i32,
        answer: &CreateAnswer,
        author_id: i32,
    ) -> AppResult<Answer> {
        // Ensure the question exists before answering
        self.get_by_id(question_id).await?;

        let created = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (question_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(question_id)
        .bind(author_id)
        .bind(&answer.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
