use std::collections::HashMap;

use rand::seq::SliceRandom;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entity::{Lang, question};

/// One page of questions plus the counts needed for pagination metadata.
pub struct QuestionPage {
    pub items: Vec<question::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Read-side queries over the question bank. Operates on any connection,
/// including an open transaction.
pub struct QueryService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> QueryService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Paginated question listing ordered by ascending id.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        lang: Option<Lang>,
    ) -> Result<QuestionPage, DbErr> {
        self.paged(question::Entity::find(), page, per_page, lang)
            .await
    }

    /// Same contract as [`list`](Self::list), narrowed to one category.
    pub async fn list_by_category(
        &self,
        category_id: i32,
        page: u64,
        per_page: u64,
        lang: Option<Lang>,
    ) -> Result<QuestionPage, DbErr> {
        let select = question::Entity::find().filter(question::Column::CategoryId.eq(category_id));
        self.paged(select, page, per_page, lang).await
    }

    async fn paged(
        &self,
        mut select: sea_orm::Select<question::Entity>,
        page: u64,
        per_page: u64,
        lang: Option<Lang>,
    ) -> Result<QuestionPage, DbErr> {
        if let Some(lang) = lang {
            select = select.filter(question::Column::Lang.eq(lang));
        }
        let paginator = select
            .order_by_asc(question::Column::Id)
            .paginate(self.conn, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok(QuestionPage {
            items,
            total,
            page,
            per_page,
            total_pages: total.div_ceil(per_page),
        })
    }

    /// Random sample of active questions in `lang`.
    ///
    /// Fetches matching ids, shuffles them in process, then fetches full rows
    /// for the chosen prefix. Avoids a server-side random sort over the whole
    /// table. The returned order follows the shuffled ids.
    pub async fn random(&self, lang: Lang, limit: u64) -> Result<Vec<question::Model>, DbErr> {
        let mut ids: Vec<i32> = question::Entity::find()
            .select_only()
            .column(question::Column::Id)
            .filter(question::Column::Lang.eq(lang))
            .filter(question::Column::Status.eq(1))
            .into_tuple()
            .all(self.conn)
            .await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        ids.shuffle(&mut rand::rng());
        ids.truncate(limit as usize);

        let rows = question::Entity::find()
            .filter(question::Column::Id.is_in(ids.clone()))
            .all(self.conn)
            .await?;

        Ok(reorder_by_ids(rows, &ids))
    }

    /// Count questions (optionally per language) and derive the ticket total.
    pub async fn ticket_count(
        &self,
        questions_per_ticket: u64,
        lang: Option<Lang>,
    ) -> Result<(u64, u64), DbErr> {
        let mut select = question::Entity::find();
        if let Some(lang) = lang {
            select = select.filter(question::Column::Lang.eq(lang));
        }
        let total = select.count(self.conn).await?;
        Ok((total, total_tickets(total, questions_per_ticket)))
    }
}

/// `ceil(total / questions_per_ticket)`. Callers must reject a zero divisor.
pub fn total_tickets(total: u64, questions_per_ticket: u64) -> u64 {
    total.div_ceil(questions_per_ticket)
}

/// Rearrange fetched rows to follow the shuffled id order.
pub fn reorder_by_ids(rows: Vec<question::Model>, ids: &[i32]) -> Vec<question::Model> {
    let mut by_id: HashMap<i32, question::Model> =
        rows.into_iter().map(|m| (m.id, m)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
