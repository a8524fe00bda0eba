use serde::{Deserialize, Serialize};

use crate::entity::{Lang, answer, question};
use crate::error::AppError;
use crate::models::category::CategoryResponse;
use crate::models::shared::double_option;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AnswerInput {
    /// Letter label shown next to the answer, e.g. "A".
    pub letter: String,
    pub value: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateQuestionRequest {
    /// Explicit identity; assigned by the database when absent.
    pub id: Option<i32>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: Option<String>,
    pub image_path: Option<String>,
    #[serde(default)]
    pub lang: Lang,
    pub category_id: Option<i32>,
    /// Free-form presentation tag, e.g. "image" or "text".
    pub r#type: Option<String>,
    pub answer_description: Option<String>,
    pub answer_video: Option<String>,
    pub video_duration: Option<i32>,
    pub comment: Option<String>,
    pub static_order_answers: Option<i32>,
    pub is_new: Option<bool>,
    pub status: Option<i32>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub lang: Option<Lang>,
    pub static_order_answers: Option<i32>,
    pub is_new: Option<bool>,
    pub status: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub correct_option: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub r#type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub answer_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub answer_video: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub video_duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCorrectOptionRequest {
    pub correct_option: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateImagePathRequest {
    pub image_path: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnswerResponse {
    pub id: i32,
    pub letter: String,
    pub value: String,
    pub correct: bool,
}

impl From<answer::Model> for AnswerResponse {
    fn from(m: answer::Model) -> Self {
        Self {
            id: m.id,
            letter: m.letter,
            value: m.value,
            correct: m.correct,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: Option<String>,
    pub image_path: Option<String>,
    pub lang: Lang,
    pub category_id: Option<i32>,
    pub r#type: Option<String>,
    pub answer_description: Option<String>,
    pub answer_video: Option<String>,
    /// Duration of `answer_video` in seconds, resolved on demand when not
    /// stored with the question.
    pub video_duration: Option<i32>,
    pub comment: Option<String>,
    pub static_order_answers: i32,
    pub is_new: bool,
    pub status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl QuestionResponse {
    pub fn with_answers(mut self, answers: Vec<answer::Model>) -> Self {
        self.answers = Some(answers.into_iter().map(AnswerResponse::from).collect());
        self
    }

    pub fn with_category(mut self, category: Option<crate::entity::category::Model>) -> Self {
        self.category = category.map(CategoryResponse::from);
        self
    }
}

impl From<question::Model> for QuestionResponse {
    fn from(m: question::Model) -> Self {
        Self {
            id: m.id,
            question: m.question,
            options: m.options,
            correct_option: m.correct_option,
            image_path: m.image_path,
            lang: m.lang,
            category_id: m.category_id,
            r#type: m.r#type,
            answer_description: m.answer_description,
            answer_video: m.answer_video,
            video_duration: m.video_duration,
            comment: m.comment,
            static_order_answers: m.static_order_answers,
            is_new: m.is_new,
            status: m.status,
            answers: None,
            category: None,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListResponse {
    /// Total matching questions across all pages.
    #[schema(example = 47)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 50)]
    pub page_size: u64,
    #[schema(example = 1)]
    pub total_pages: u64,
    pub data: Vec<QuestionResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResponse {
    pub created: usize,
    pub failed: usize,
    /// Ids of the questions persisted, in input order.
    pub ids: Vec<i32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuestionsQuery {
    /// 1-based page number (default 1).
    pub page: Option<u64>,
    /// Items per page, 1-100 (default 50).
    pub per_page: Option<u64>,
    /// Filter by language.
    pub lang: Option<Lang>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct RandomQuestionsQuery {
    /// Language to sample from (default uz).
    pub lang: Option<Lang>,
    /// Maximum number of questions returned (default 50).
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TicketCountQuery {
    /// Questions bundled per ticket; must be at least 1.
    pub questions_per_ticket: u64,
    /// Restrict the count to one language.
    pub lang: Option<Lang>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCountResponse {
    #[schema(example = 45)]
    pub total_questions: u64,
    #[schema(example = 20)]
    pub questions_per_ticket: u64,
    #[schema(example = 3)]
    pub total_tickets: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
}

pub fn validate_create_question(req: &CreateQuestionRequest) -> Result<(), AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("question must not be empty".into()));
    }
    if req.options.is_empty() {
        return Err(AppError::Validation("options must not be empty".into()));
    }
    for answer in &req.answers {
        if answer.letter.trim().is_empty() {
            return Err(AppError::Validation(
                "answer letter must not be empty".into(),
            ));
        }
    }
    Ok(())
}

pub fn validate_update_question(req: &UpdateQuestionRequest) -> Result<(), AppError> {
    if let Some(ref question) = req.question
        && question.trim().is_empty()
    {
        return Err(AppError::Validation("question must not be empty".into()));
    }
    if let Some(ref options) = req.options
        && options.is_empty()
    {
        return Err(AppError::Validation("options must not be empty".into()));
    }
    Ok(())
}
