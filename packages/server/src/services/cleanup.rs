use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

/// Tables cleared by a purge, in foreign-key dependency order. Answers come
/// last as a safety net in case the question cascade was bypassed.
const PURGE_ORDER: [&str; 5] = [
    "question_template",
    "question",
    "category",
    "template",
    "answer",
];

pub struct CleanupService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CleanupService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Empty every question-bank table and reset identity sequences.
    ///
    /// Idempotent; truncating an already-empty table is a no-op.
    pub async fn purge_all(&self) -> Result<(), DbErr> {
        for table in PURGE_ORDER {
            self.conn
                .execute_unprepared(&format!(
                    "TRUNCATE TABLE \"{table}\" RESTART IDENTITY CASCADE"
                ))
                .await?;
            info!(table, "truncated");
        }
        Ok(())
    }
}
