use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table linking questions to the templates that group them.
/// Rows have no independent lifecycle; they only mirror the many-to-many
/// state and are rewritten wholesale by the importer.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub question_id: i32,
    #[sea_orm(primary_key)]
    pub template_id: i32,

    #[sea_orm(belongs_to, from = "question_id", to = "id")]
    pub question: HasOne<super::question::Entity>,
    #[sea_orm(belongs_to, from = "template_id", to = "id")]
    pub template: HasOne<super::template::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
