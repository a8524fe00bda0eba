use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    Set,
};
use tracing::{info, warn};

use crate::entity::{category, question, question_template, template};
use crate::error::AppError;
use crate::models::import::{ImportRecord, ImportSummary, ImportTemplate};

/// Best-effort bulk importer for external question documents.
///
/// Every record is processed independently; a bad record is logged, counted,
/// and skipped. The run itself only fails on document-level problems
/// (unreadable file, malformed JSON).
pub struct ImportService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ImportService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Read a JSON document from disk and import its records.
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary, AppError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Internal(format!("reading {}: {e}", path.display())))?;
        let records: Vec<ImportRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Validation(format!("malformed import document {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), records = records.len(), "importing question document");
        Ok(self.import_records(records).await?)
    }

    /// Reconcile a sequence of records against the store.
    pub async fn import_records(
        &self,
        records: Vec<ImportRecord>,
    ) -> Result<ImportSummary, DbErr> {
        self.ensure_categories(&records).await;

        // One id scan up front classifies every record as insert vs update.
        let existing: HashSet<i32> = question::Entity::find()
            .select_only()
            .column(question::Column::Id)
            .into_tuple()
            .all(self.conn)
            .await?
            .into_iter()
            .collect();
        info!(existing = existing.len(), "existing questions loaded");

        let mut summary = ImportSummary::default();
        for record in records {
            let id = record.id;
            let known = existing.contains(&id);
            match self.upsert_record(record).await {
                Ok(()) => {
                    if known {
                        summary.updated += 1;
                    } else {
                        summary.created += 1;
                    }
                    let processed = summary.created + summary.updated;
                    if processed % 100 == 0 {
                        info!(processed, "import progress");
                    }
                }
                Err(e) => {
                    summary.errors += 1;
                    warn!(question_id = id, error = %e, "skipping record");
                }
            }
        }

        summary.total = question::Entity::find().count(self.conn).await?;
        info!(
            created = summary.created,
            updated = summary.updated,
            errors = summary.errors,
            total = summary.total,
            "import finished"
        );
        Ok(summary)
    }

    /// Insert a stub category for every referenced id that may be missing.
    ///
    /// Idempotent (`ON CONFLICT DO NOTHING`); failures here are recoverable,
    /// the questions are still attempted.
    async fn ensure_categories(&self, records: &[ImportRecord]) {
        let ids: BTreeSet<i32> = records.iter().filter_map(|r| r.category_id).collect();
        info!(categories = ids.len(), "ensuring referenced categories");

        for id in ids {
            let stub = category::ActiveModel {
                id: Set(id),
                name: Set(format!("Category {id}")),
                description: Set(None),
                status: Set(1),
            };
            let res = category::Entity::insert(stub)
                .on_conflict(
                    OnConflict::column(category::Column::Id)
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.conn)
                .await;
            match res {
                Ok(_) | Err(DbErr::RecordNotInserted) => {}
                Err(e) => warn!(category_id = id, error = %e, "stub category insert failed"),
            }
        }
    }

    /// Fetch-or-create the templates a record references. Existing templates
    /// are left untouched. A failure drops that one link, not the record.
    async fn resolve_templates(&self, refs: &[ImportTemplate]) -> Vec<i32> {
        let mut resolved = Vec::with_capacity(refs.len());
        for t in refs {
            match self.fetch_or_create_template(t).await {
                Ok(id) => resolved.push(id),
                Err(e) => {
                    warn!(template_id = t.id, error = %e, "template resolution failed")
                }
            }
        }
        resolved
    }

    async fn fetch_or_create_template(&self, t: &ImportTemplate) -> Result<i32, DbErr> {
        if let Some(found) = template::Entity::find_by_id(t.id).one(self.conn).await? {
            return Ok(found.id);
        }

        let now = chrono::Utc::now();
        let res = template::Entity::insert(template::ActiveModel {
            id: Set(t.id),
            name: Set(t.name.clone()),
            status: Set(t.status),
            questions_count: Set(t.questions_count),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::column(template::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec(self.conn)
        .await;
        match res {
            // Lost a race to a concurrent insert; the row exists either way.
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(t.id),
            Err(e) => Err(e),
        }
    }

    /// Upsert one question by its document id and replace its template links.
    async fn upsert_record(&self, record: ImportRecord) -> Result<(), DbErr> {
        let template_ids = self.resolve_templates(&record.templates).await;

        let model = question::ActiveModel {
            id: Set(record.id),
            question: Set(record.question),
            options: Set(record.options),
            correct_option: Set(record.correct_option),
            image_path: Set(record.image_path),
            lang: Set(record.lang),
            category_id: Set(record.category_id),
            r#type: Set(record.r#type),
            answer_description: Set(record.answer_description),
            answer_video: Set(record.answer_video),
            video_duration: Set(record.video_duration),
            comment: Set(record.comment),
            static_order_answers: Set(record.static_order_answers),
            is_new: Set(record.is_new),
            status: Set(record.status),
        };

        question::Entity::insert(model)
            .on_conflict(
                OnConflict::column(question::Column::Id)
                    .update_columns([
                        question::Column::Question,
                        question::Column::Options,
                        question::Column::CorrectOption,
                        question::Column::ImagePath,
                        question::Column::Lang,
                        question::Column::CategoryId,
                        question::Column::Type,
                        question::Column::AnswerDescription,
                        question::Column::AnswerVideo,
                        question::Column::VideoDuration,
                        question::Column::Comment,
                        question::Column::StaticOrderAnswers,
                        question::Column::IsNew,
                        question::Column::Status,
                    ])
                    .to_owned(),
            )
            .exec(self.conn)
            .await?;

        // Replace, not merge, the record's template associations.
        question_template::Entity::delete_many()
            .filter(question_template::Column::QuestionId.eq(record.id))
            .exec(self.conn)
            .await?;
        if !template_ids.is_empty() {
            let links = template_ids
                .into_iter()
                .map(|template_id| question_template::ActiveModel {
                    question_id: Set(record.id),
                    template_id: Set(template_id),
                });
            question_template::Entity::insert_many(links)
                .on_conflict(
                    OnConflict::columns([
                        question_template::Column::QuestionId,
                        question_template::Column::TemplateId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec(self.conn)
                .await
                .map(|_| ())
                .or_else(|e| match e {
                    DbErr::RecordNotInserted => Ok(()),
                    other => Err(other),
                })?;
        }

        Ok(())
    }
}
