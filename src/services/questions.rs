//! Community Q&A hub service

use crate::{
    error::AppResult,
    models::question::{
        Answer, CreateAnswer, CreateQuestion, Question, QuestionDetail, QuestionSummary,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct QuestionsService {
    repository: Repository,
}

impl QuestionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<QuestionSummary>> {
        self.repository.questions.list().await
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<QuestionDetail> {
        let question = self.repository.questions.get_by_id(id).await?;
        let answers = self.repository.questions.answers(id).await?;
        Ok(QuestionDetail { question, answers })
    }

    pub async fn create(&self, question: CreateQuestion, author_id: i32) -> AppResult<Question> {
        self.repository.questions.create(&question, author_id).await
    }

    pub async fn answer(
        &self,
        question_id: i32,
        answer: CreateAnswer,
        author_id: i32,
    ) -> AppResult<Answer> {
        self.repository
            .questions
            .create_answer(question_id, &answer, author_id)
            .await
    }
}
