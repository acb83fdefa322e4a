use std::marker::PhantomData;

use sea_orm::{DbConn, EntityTrait, PrimaryKeyTrait, TransactionTrait};

use inkpost_core::RepoError;
use inkpost_core::error::RepoResult;

use super::errors::db_err;

/// Generic PostgreSQL repository over an entity with an `i32` primary key.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Fetch a row by id.
    pub(crate) async fn find_model(&self, id: i32) -> RepoResult<Option<E::Model>> {
        E::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    /// Delete a row by id and return it as it was before deletion.
    pub(crate) async fn delete_returning(
        &self,
        id: i32,
        entity: &'static str,
    ) -> RepoResult<E::Model> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = E::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| RepoError::not_found(entity, format!("id={id}")))?;

        let result = E::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::not_found(entity, format!("id={id}")));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model)
    }
}
