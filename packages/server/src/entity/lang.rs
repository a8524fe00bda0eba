use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Question language.
///
/// The column default is `ru`; `uz` (Latin script) and `kr` (Cyrillic script)
/// cover the other two variants of the question bank.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[sea_orm(string_value = "uz")]
    Uz,
    #[sea_orm(string_value = "kr")]
    Kr,
    #[default]
    #[sea_orm(string_value = "ru")]
    Ru,
}
