use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/categories", category_routes())
        .nest("/questions", question_routes())
        .nest("/upload", upload_routes(config))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::category::list_categories))
}

fn question_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::question::list_questions,
            handlers::question::create_question
        ))
        .routes(routes!(handlers::question::bulk_create_questions))
        .routes(routes!(handlers::question::random_questions))
        .routes(routes!(handlers::question::ticket_count))
        .routes(routes!(handlers::question::list_questions_by_category))
        .routes(routes!(handlers::import::import_lotin))
        .routes(routes!(handlers::import::import_rus))
        .routes(routes!(handlers::import::import_crill))
        .routes(routes!(handlers::import::import_all))
        .routes(routes!(handlers::import::cleanup))
        .routes(routes!(
            handlers::question::get_question,
            handlers::question::update_question,
            handlers::question::delete_question
        ))
        .routes(routes!(handlers::question::update_correct_option))
        .routes(routes!(handlers::question::update_image_path))
}

fn upload_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_file))
        .layer(handlers::upload::upload_body_limit(
            config.storage.max_upload_size,
        ))
}
