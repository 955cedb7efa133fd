//! Item search through the `search_items` database function.

use homeinv_core::search::SearchHit;
use homeinv_core::types::UserId;
use sqlx::PgPool;

pub struct SearchRepo;

impl SearchRepo {
    /// Run `search_items(term, owner)`. Callers guard against blank terms.
    pub async fn search_items(
        pool: &PgPool,
        owner: UserId,
        term: &str,
    ) -> Result<Vec<SearchHit>, sqlx::Error> {
        sqlx::query_as::<_, SearchHit>("SELECT * FROM search_items($1, $2)")
            .bind(term)
            .bind(owner)
            .fetch_all(pool)
            .await
    }
}
