use axum::Json;
use axum::extract::State;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::instrument;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::models::category::CategoryResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List all categories",
    responses(
        (status = 200, description = "All categories, ordered by id", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}
