use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{instrument, warn};

use crate::entity::{Lang, answer, category, question, question_template};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::question::*;
use crate::models::shared::clamp_pagination;
use crate::services::query::{QueryService, QuestionPage, total_tickets};
use crate::state::AppState;

/// Fill in a lazily resolved video duration when the row does not carry one.
fn resolve_duration(state: &AppState, resp: &mut QuestionResponse) {
    if resp.video_duration.is_none()
        && let Some(ref video) = resp.answer_video
    {
        resp.video_duration = state.durations.resolve(video);
    }
}

fn page_response(state: &AppState, page: QuestionPage) -> QuestionListResponse {
    let data = page
        .items
        .into_iter()
        .map(|m| {
            let mut resp = QuestionResponse::from(m);
            resolve_duration(state, &mut resp);
            resp
        })
        .collect();

    QuestionListResponse {
        total: page.total,
        page: page.page,
        page_size: page.per_page,
        total_pages: page.total_pages,
        data,
    }
}

/// Insert one question with its nested answers. Runs on the given
/// connection, which lets bulk creation give each element its own
/// transaction.
async fn insert_question<C: ConnectionTrait>(
    conn: &C,
    req: CreateQuestionRequest,
) -> Result<(question::Model, Vec<answer::Model>), AppError> {
    let mut model = question::ActiveModel {
        question: Set(req.question),
        options: Set(req.options),
        correct_option: Set(req.correct_option),
        image_path: Set(req.image_path),
        lang: Set(req.lang),
        category_id: Set(req.category_id),
        r#type: Set(req.r#type),
        answer_description: Set(req.answer_description),
        answer_video: Set(req.answer_video),
        video_duration: Set(req.video_duration),
        comment: Set(req.comment),
        static_order_answers: Set(req.static_order_answers.unwrap_or(0)),
        is_new: Set(req.is_new.unwrap_or(false)),
        status: Set(req.status.unwrap_or(1)),
        ..Default::default()
    };
    if let Some(id) = req.id {
        model.id = Set(id);
    }

    let inserted = model.insert(conn).await?;

    let mut answers = Vec::with_capacity(req.answers.len());
    for input in req.answers {
        let saved = answer::ActiveModel {
            letter: Set(input.letter),
            value: Set(input.value),
            correct: Set(input.correct),
            question_id: Set(inserted.id),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        answers.push(saved);
    }

    Ok((inserted, answers))
}

async fn find_question<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<question::Model, AppError> {
    question::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Questions",
    operation_id = "createQuestion",
    summary = "Create a question with nested answers",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_question(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_question(&payload)?;

    let txn = state.db.begin().await?;
    let (model, answers) = insert_question(&txn, payload).await?;
    txn.commit().await?;

    let mut resp = QuestionResponse::from(model).with_answers(answers);
    resolve_duration(&state, &mut resp);
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/bulk",
    tag = "Questions",
    operation_id = "bulkCreateQuestions",
    summary = "Create many questions",
    description = "Persists each element independently in its own transaction; a failing \
        element is skipped and counted, the rest still commit.",
    request_body = Vec<CreateQuestionRequest>,
    responses(
        (status = 201, description = "Batch processed", body = BulkCreateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(batch = payload.len()))]
pub async fn bulk_create_questions(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<CreateQuestionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let mut created = Vec::with_capacity(payload.len());
    let mut failed = 0usize;

    for req in payload {
        let outcome = async {
            validate_create_question(&req)?;
            let txn = state.db.begin().await?;
            let (model, _) = insert_question(&txn, req).await?;
            txn.commit().await?;
            Ok::<_, AppError>(model.id)
        }
        .await;

        match outcome {
            Ok(id) => created.push(id),
            Err(e) => {
                failed += 1;
                warn!(error = ?e, "bulk element failed");
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(BulkCreateResponse {
            created: created.len(),
            failed,
            ids: created,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Questions",
    operation_id = "listQuestions",
    summary = "List questions with pagination",
    params(ListQuestionsQuery),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<QuestionListResponse>, AppError> {
    let (page, per_page) = clamp_pagination(query.page, query.per_page);
    let result = QueryService::new(&state.db)
        .list(page, per_page, query.lang)
        .await?;

    Ok(Json(page_response(&state, result)))
}

#[utoipa::path(
    get,
    path = "/by-category/{category_id}",
    tag = "Questions",
    operation_id = "listQuestionsByCategory",
    summary = "List questions in one category",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
        ListQuestionsQuery,
    ),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<QuestionListResponse>, AppError> {
    let (page, per_page) = clamp_pagination(query.page, query.per_page);
    let result = QueryService::new(&state.db)
        .list_by_category(category_id, page, per_page, query.lang)
        .await?;

    let category = category::Entity::find_by_id(category_id)
        .one(&state.db)
        .await?;

    let mut response = page_response(&state, result);
    for item in &mut response.data {
        item.category = category
            .clone()
            .map(crate::models::category::CategoryResponse::from);
    }

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/random",
    tag = "Questions",
    operation_id = "randomQuestions",
    summary = "Random sample of active questions",
    params(RandomQuestionsQuery),
    responses(
        (status = 200, description = "Randomly ordered questions", body = Vec<QuestionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn random_questions(
    State(state): State<AppState>,
    Query(query): Query<RandomQuestionsQuery>,
) -> Result<Json<Vec<QuestionResponse>>, AppError> {
    let lang = query.lang.unwrap_or(Lang::Uz);
    let limit = query.limit.unwrap_or(50).max(1);

    let rows = QueryService::new(&state.db).random(lang, limit).await?;
    let data = rows
        .into_iter()
        .map(|m| {
            let mut resp = QuestionResponse::from(m);
            resolve_duration(&state, &mut resp);
            resp
        })
        .collect();

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/ticket-count",
    tag = "Questions",
    operation_id = "ticketCount",
    summary = "Number of tickets the bank can fill",
    params(TicketCountQuery),
    responses(
        (status = 200, description = "Ticket math", body = TicketCountResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn ticket_count(
    State(state): State<AppState>,
    Query(query): Query<TicketCountQuery>,
) -> Result<Json<TicketCountResponse>, AppError> {
    if query.questions_per_ticket == 0 {
        return Err(AppError::Validation(
            "questions_per_ticket must be at least 1".into(),
        ));
    }

    let (total, tickets) = QueryService::new(&state.db)
        .ticket_count(query.questions_per_ticket, query.lang)
        .await?;
    debug_assert_eq!(tickets, total_tickets(total, query.questions_per_ticket));

    Ok(Json(TicketCountResponse {
        total_questions: total,
        questions_per_ticket: query.questions_per_ticket,
        total_tickets: tickets,
        lang: query.lang,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Questions",
    operation_id = "getQuestion",
    summary = "Get one question with its answers",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "The question", body = QuestionResponse),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuestionResponse>, AppError> {
    let model = find_question(&state.db, id).await?;
    let answers = model.find_related(answer::Entity).all(&state.db).await?;

    let mut resp = QuestionResponse::from(model).with_answers(answers);
    resolve_duration(&state, &mut resp);
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Questions",
    operation_id = "updateQuestion",
    summary = "Partially update a question",
    description = "Absent fields are left untouched; nullable fields set to JSON null are \
        cleared.",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateQuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    validate_update_question(&payload)?;

    let model = find_question(&state.db, id).await?;
    let mut active = model.into_active_model();

    if let Some(question) = payload.question {
        active.question = Set(question);
    }
    if let Some(options) = payload.options {
        active.options = Set(options);
    }
    if let Some(lang) = payload.lang {
        active.lang = Set(lang);
    }
    if let Some(flag) = payload.static_order_answers {
        active.static_order_answers = Set(flag);
    }
    if let Some(is_new) = payload.is_new {
        active.is_new = Set(is_new);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(correct_option) = payload.correct_option {
        active.correct_option = Set(correct_option);
    }
    if let Some(image_path) = payload.image_path {
        active.image_path = Set(image_path);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(kind) = payload.r#type {
        active.r#type = Set(kind);
    }
    if let Some(description) = payload.answer_description {
        active.answer_description = Set(description);
    }
    if let Some(video) = payload.answer_video {
        active.answer_video = Set(video);
    }
    if let Some(duration) = payload.video_duration {
        active.video_duration = Set(duration);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(comment);
    }

    let updated = active.update(&state.db).await?;
    let answers = updated.find_related(answer::Entity).all(&state.db).await?;

    let mut resp = QuestionResponse::from(updated).with_answers(answers);
    resolve_duration(&state, &mut resp);
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/{id}/correct-option",
    tag = "Questions",
    operation_id = "updateCorrectOption",
    summary = "Set a question's correct option",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateCorrectOptionRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_correct_option(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCorrectOptionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let model = find_question(&state.db, id).await?;
    let mut active = model.into_active_model();
    active.correct_option = Set(Some(payload.correct_option));
    let updated = active.update(&state.db).await?;

    Ok(Json(QuestionResponse::from(updated)))
}

#[utoipa::path(
    patch,
    path = "/{id}/image-path",
    tag = "Questions",
    operation_id = "updateImagePath",
    summary = "Set a question's image path",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateImagePathRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_image_path(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateImagePathRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let model = find_question(&state.db, id).await?;
    let mut active = model.into_active_model();
    active.image_path = Set(Some(payload.image_path));
    let updated = active.update(&state.db).await?;

    Ok(Json(QuestionResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Questions",
    operation_id = "deleteQuestion",
    summary = "Delete a question and its answers",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let model = find_question(&txn, id).await?;

    // Children first, then the question itself.
    answer::Entity::delete_many()
        .filter(answer::Column::QuestionId.eq(id))
        .exec(&txn)
        .await?;
    question_template::Entity::delete_many()
        .filter(question_template::Column::QuestionId.eq(id))
        .exec(&txn)
        .await?;
    model.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
