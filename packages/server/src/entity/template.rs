use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(default_value = 1)]
    pub status: i32, // 1 = active
    /// Cached number of questions grouped by this template, as supplied by
    /// the import document. Not maintained by this service.
    pub questions_count: Option<i32>,

    #[sea_orm(has_many, via = "question_template")]
    pub questions: HasMany<super::question::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
