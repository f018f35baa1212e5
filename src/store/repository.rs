//! Generic CRUD over a single table

use libsql::{Connection, Row, Rows, Value, params};
use std::marker::PhantomData;
use tracing::debug;

use crate::store::error::DbError;

/// A type stored as one row of one table.
///
/// Rows are read back as `id` followed by [`Entity::COLUMNS`] in order.
pub trait Entity: Sized + Send + Sync {
    /// Table name
    const TABLE: &'static str;

    /// Column names excluding the `id` primary key
    const COLUMNS: &'static [&'static str];

    /// Values for [`Entity::COLUMNS`], in the same order
    fn values(&self) -> Result<Vec<Value>, DbError>;

    /// Build the entity from a row selected as `id, COLUMNS...`
    fn from_row(row: &Row) -> Result<Self, DbError>;
}

/// CRUD operations for `T`, bound to the connection of a session
pub struct Repository<'s, T> {
    conn: &'s Connection,
    _entity: PhantomData<T>,
}

impl<'s, T: Entity> Repository<'s, T> {
    pub(crate) fn new(conn: &'s Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }

    async fn collect(mut rows: Rows) -> Result<Vec<T>, DbError> {
        let mut entities = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DbError::Data(format!("Failed to read row: {}", e)))?
        {
            entities.push(T::from_row(&row)?);
        }
        Ok(entities)
    }

    /// Get the entity with the given id
    pub async fn get_one(&self, id: i64) -> Result<Option<T>, DbError> {
        let sql = format!("{} WHERE id = ?", Self::select_sql());
        let rows = self
            .conn
            .query(&sql, params![id])
            .await
            .map_err(|e| DbError::Query(format!("Failed to get {} row: {}", T::TABLE, e)))?;

        Ok(Self::collect(rows).await?.into_iter().next())
    }

    /// Get the entities with the given ids, ordered by id. Unknown ids are skipped.
    pub async fn get_multiple(&self, ids: &[i64]) -> Result<Vec<T>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{} WHERE id IN ({}) ORDER BY id",
            Self::select_sql(),
            Self::placeholders(ids.len())
        );
        let params: Vec<Value> = ids.iter().map(|id| Value::Integer(*id)).collect();
        let rows = self
            .conn
            .query(&sql, params)
            .await
            .map_err(|e| DbError::Query(format!("Failed to get {} rows: {}", T::TABLE, e)))?;

        Self::collect(rows).await
    }

    /// Get every entity, ordered by id
    pub async fn get_all(&self) -> Result<Vec<T>, DbError> {
        let sql = format!("{} ORDER BY id", Self::select_sql());
        let rows = self
            .conn
            .query(&sql, params![])
            .await
            .map_err(|e| DbError::Query(format!("Failed to get {} rows: {}", T::TABLE, e)))?;

        Self::collect(rows).await
    }

    /// Insert an entity and return its new id
    pub async fn add_one(&self, entity: &T) -> Result<i64, DbError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            Self::placeholders(T::COLUMNS.len())
        );
        self.conn
            .execute(&sql, entity.values()?)
            .await
            .map_err(|e| DbError::Query(format!("Failed to add {} row: {}", T::TABLE, e)))?;

        let mut rows = self
            .conn
            .query("SELECT last_insert_rowid()", params![])
            .await
            .map_err(|e| DbError::Query(format!("Failed to get last insert ID: {}", e)))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                return Err(DbError::Data(
                    "No ID returned from last_insert_rowid()".to_string(),
                ));
            }
            Err(e) => return Err(DbError::Data(format!("Failed to get ID: {}", e))),
        };

        let id = row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to get ID: {}", e)))?;
        debug!("Inserted {} row {}", T::TABLE, id);
        Ok(id)
    }

    /// Insert several entities, returning their ids in input order
    pub async fn add_many(&self, entities: &[T]) -> Result<Vec<i64>, DbError> {
        let mut ids = Vec::with_capacity(entities.len());
        for entity in entities {
            ids.push(self.add_one(entity).await?);
        }
        Ok(ids)
    }

    /// Delete the entity with the given id. Returns whether a row was removed.
    pub async fn delete_one(&self, id: i64) -> Result<bool, DbError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let affected = self
            .conn
            .execute(&sql, params![id])
            .await
            .map_err(|e| DbError::Query(format!("Failed to delete {} row: {}", T::TABLE, e)))?;

        debug!("Deleted {} {} rows with id {}", affected, T::TABLE, id);
        Ok(affected > 0)
    }

    /// Delete the entities with the given ids. Returns how many rows were removed.
    pub async fn delete_many(&self, ids: &[i64]) -> Result<usize, DbError> {
        let mut removed = 0;
        for id in ids {
            if self.delete_one(*id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
