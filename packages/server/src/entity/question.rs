use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lang::Lang;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub question: String,
    /// Presentation order of the options as shown to the examinee.
    pub options: Vec<String>,
    pub correct_option: Option<String>,
    pub image_path: Option<String>,
    #[sea_orm(default_value = "ru")]
    pub lang: Lang,

    /// NULL for uncategorized questions.
    pub category_id: Option<i32>,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    pub r#type: Option<String>, // "image" or "text"
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_description: Option<String>,
    pub answer_video: Option<String>,
    /// Duration of `answer_video` in seconds. Only persisted when the import
    /// document or a client sets it explicitly; otherwise resolved on demand
    /// through the in-process duration cache.
    pub video_duration: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,

    /// 0 = answers may be shuffled by the client, 1 = fixed order.
    #[sea_orm(default_value = 0)]
    pub static_order_answers: i32,
    #[sea_orm(default_value = false)]
    pub is_new: bool,
    #[sea_orm(default_value = 1)]
    pub status: i32, // 1 = active

    #[sea_orm(has_many)]
    pub answers: HasMany<super::answer::Entity>,

    #[sea_orm(has_many, via = "question_template")]
    pub templates: HasMany<super::template::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
