//! Generic repository helpers shared by every entity keyed on an `i32` surrogate id.
//!
//! Entity modules implement [`IdColumn`]; services then get find / exists / delete
//! without per-entity boilerplate. Every helper accepts any `ConnectionTrait`, so the
//! same call works on a pooled connection or inside a transaction.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::errors::ModelError;

/// Binds an entity to its surrogate-key column.
pub trait IdColumn: EntityTrait {
    fn id_column() -> Self::Column;
}

/// All rows ordered by id; `page` is `(zero_based_index, per_page)`.
pub async fn find_all<E, C>(db: &C, page: Option<(u64, u64)>) -> Result<Vec<E::Model>, ModelError>
where
    E: IdColumn,
    E::Model: Sync + 'static,
    C: ConnectionTrait,
{
    let query = E::find().order_by_asc(E::id_column());
    let rows = match page {
        Some((idx, per_page)) => query.paginate(db, per_page).fetch_page(idx).await?,
        None => query.all(db).await?,
    };
    Ok(rows)
}

pub async fn find_by_id<E, C>(db: &C, id: i32) -> Result<Option<E::Model>, ModelError>
where
    E: IdColumn,
    C: ConnectionTrait,
{
    Ok(E::find().filter(E::id_column().eq(id)).one(db).await?)
}

pub async fn exists_by_id<E, C>(db: &C, id: i32) -> Result<bool, ModelError>
where
    E: IdColumn,
    C: ConnectionTrait,
{
    Ok(find_by_id::<E, C>(db, id).await?.is_some())
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<E, C>(db: &C, id: i32) -> Result<u64, ModelError>
where
    E: IdColumn,
    C: ConnectionTrait,
{
    let res = E::delete_many().filter(E::id_column().eq(id)).exec(db).await?;
    Ok(res.rows_affected)
}

/// Bulk delete; ids without a row are skipped silently.
pub async fn delete_by_ids<E, C>(db: &C, ids: &[i32]) -> Result<u64, ModelError>
where
    E: IdColumn,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }
    let res = E::delete_many()
        .filter(E::id_column().is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
