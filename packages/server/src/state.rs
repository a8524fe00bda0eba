use std::sync::Arc;

use common::MediaStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::duration::DurationCache;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub media: Arc<dyn MediaStore>,
    pub durations: Arc<DurationCache>,
}
