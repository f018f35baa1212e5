//! Database handle and scoped sessions

use futures::future::BoxFuture;
use libsql::{Connection, params};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::store::error::DbError;
use crate::store::posting::Posting;
use crate::store::repository::{Entity, Repository};
use crate::store::schema;

/// Database manager for saved postings
#[derive(Clone)]
pub struct Database {
    db: Arc<libsql::Database>,
}

impl Database {
    /// Open (or create) a local database at `path` and ensure the schema exists
    #[instrument]
    pub async fn new_from_path(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let database = Self { db: Arc::new(db) };
        let conn = database.connect()?;
        schema::initialize_schema(&conn).await?;

        Ok(database)
    }

    fn connect(&self) -> Result<Connection, DbError> {
        self.db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))
    }

    /// Run `op` inside a transaction on a fresh connection.
    ///
    /// The transaction is committed when `op` succeeds and rolled back when it
    /// fails; either way the connection is released before this returns. If `op`
    /// panics the connection is dropped with the transaction still open, which
    /// discards it.
    pub async fn scoped<T, F>(&self, op: F) -> Result<T, DbError>
    where
        T: Send,
        F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, Result<T, DbError>> + Send,
    {
        let conn = self.connect()?;
        conn.execute("BEGIN", params![])
            .await
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;
        let session = Session { conn };

        match op(&session).await {
            Ok(value) => {
                session
                    .conn
                    .execute("COMMIT", params![])
                    .await
                    .map_err(|e| {
                        DbError::Transaction(format!("Failed to commit transaction: {}", e))
                    })?;
                debug!("Session committed");
                Ok(value)
            }
            Err(err) => {
                error!("Exception when operating on db, rolling back: {}", err);
                if let Err(e) = session.conn.execute("ROLLBACK", params![]).await {
                    warn!("Failed to roll back transaction: {}", e);
                }
                Err(err)
            }
        }
    }
}

/// A unit of work bound to one connection and one transaction
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Repository for any entity type
    pub fn repository<T: Entity>(&self) -> Repository<'_, T> {
        Repository::new(&self.conn)
    }

    /// Repository for saved postings
    pub fn postings(&self) -> Repository<'_, Posting> {
        self.repository()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::Seniority;
    use futures::FutureExt;
    use tempfile::tempdir;

    async fn setup_test_db() -> Result<(Database, tempfile::TempDir), DbError> {
        // Create a temporary directory for the database
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();

        let db = Database::new_from_path(&db_path).await?;

        Ok((db, temp_dir))
    }

    fn posting(name: &str, url: &str) -> Posting {
        Posting::new(name, url)
    }

    #[tokio::test]
    async fn test_database_initialization() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let tables = db
            .scoped(|session| {
                async move {
                    let mut rows = session
                        .conn
                        .query(
                            "SELECT name FROM sqlite_master WHERE type IN ('table', 'index') AND name LIKE '%postings%'",
                            params![],
                        )
                        .await?;
                    let mut names = Vec::new();
                    while let Some(row) = rows.next().await? {
                        names.push(row.get::<String>(0)?);
                    }
                    Ok(names)
                }
                .boxed()
            })
            .await
            .unwrap();

        assert!(tables.contains(&"postings".to_string()));
        assert!(tables.contains(&"idx_postings_name".to_string()));
        assert!(tables.contains(&"idx_postings_seniority".to_string()));
    }

    #[tokio::test]
    async fn test_schema_initialization_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("again.db").to_string_lossy().to_string();

        let first = Database::new_from_path(&db_path).await.unwrap();
        let id = first
            .scoped(|session| {
                async move { session.postings().add_one(&posting("Dev", "/dev")).await }.boxed()
            })
            .await
            .unwrap();

        let second = Database::new_from_path(&db_path).await.unwrap();
        let found = second
            .scoped(|session| async move { session.postings().get_one(id).await }.boxed())
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.name), Some("Dev".to_string()));
    }

    #[tokio::test]
    async fn test_add_and_get_posting() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();
        let mut saved = posting("Senior Rust Developer", "https://example.com/rust");
        saved.tags = vec!["Rust".to_string(), "Tokio, Axum".to_string()];
        let to_insert = saved.clone();

        let id = db
            .scoped(|session| async move { session.postings().add_one(&to_insert).await }.boxed())
            .await
            .unwrap();
        assert!(id > 0);

        let retrieved = db
            .scoped(|session| async move { session.postings().get_one(id).await }.boxed())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.name, "Senior Rust Developer");
        assert_eq!(retrieved.url, "https://example.com/rust");
        assert_eq!(retrieved.seniority, Seniority::Senior);
        assert_eq!(retrieved.tags, saved.tags);
        assert_eq!(retrieved.scraped_on.timestamp(), saved.scraped_on.timestamp());
    }

    #[tokio::test]
    async fn test_get_one_filters_by_id() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();
        let batch = vec![posting("First", "/1"), posting("Second", "/2")];

        let ids = db
            .scoped(|session| async move { session.postings().add_many(&batch).await }.boxed())
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        let second_id = ids[1];

        let second = db
            .scoped(|session| async move { session.postings().get_one(second_id).await }.boxed())
            .await
            .unwrap();
        assert_eq!(second.map(|p| p.name), Some("Second".to_string()));

        let missing = db
            .scoped(|session| async move { session.postings().get_one(9_999).await }.boxed())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_multiple_and_all() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();
        let batch = vec![posting("A", "/a"), posting("B", "/b"), posting("C", "/c")];

        let ids = db
            .scoped(|session| async move { session.postings().add_many(&batch).await }.boxed())
            .await
            .unwrap();
        let wanted = vec![ids[2], ids[0], 12_345];

        let (some, all) = db
            .scoped(|session| {
                async move {
                    let repo = session.postings();
                    Ok((repo.get_multiple(&wanted).await?, repo.get_all().await?))
                }
                .boxed()
            })
            .await
            .unwrap();

        let names: Vec<&str> = some.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].name, "B");
    }

    #[tokio::test]
    async fn test_delete_one_twice_is_a_no_op() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();
        let batch = vec![posting("Keep", "/keep"), posting("Drop", "/drop")];

        let ids = db
            .scoped(|session| async move { session.postings().add_many(&batch).await }.boxed())
            .await
            .unwrap();
        let drop_id = ids[1];

        let first = db
            .scoped(|session| async move { session.postings().delete_one(drop_id).await }.boxed())
            .await
            .unwrap();
        let second = db
            .scoped(|session| async move { session.postings().delete_one(drop_id).await }.boxed())
            .await
            .unwrap();
        assert!(first);
        assert!(!second);

        let remaining = db
            .scoped(|session| async move { session.postings().get_all().await }.boxed())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Keep");
    }

    #[tokio::test]
    async fn test_delete_many_counts_removed_rows() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();
        let batch = vec![posting("A", "/a"), posting("B", "/b")];

        let ids = db
            .scoped(|session| async move { session.postings().add_many(&batch).await }.boxed())
            .await
            .unwrap();
        let doomed = vec![ids[0], ids[1], 777];

        let removed = db
            .scoped(|session| async move { session.postings().delete_many(&doomed).await }.boxed())
            .await
            .unwrap();
        assert_eq!(removed, 2);
    }

    #[tokio::test]
    async fn test_failed_session_rolls_back() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        // The second insert violates the unique url constraint.
        let batch = vec![posting("One", "/same"), posting("Two", "/same")];
        let result = db
            .scoped(|session| async move { session.postings().add_many(&batch).await }.boxed())
            .await;
        assert!(matches!(result, Err(DbError::Query(_))));

        let all = db
            .scoped(|session| async move { session.postings().get_all().await }.boxed())
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_database_usable_after_rollback() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let failed: Result<(), DbError> = db
            .scoped(|_session| async move { Err(DbError::Data("boom".to_string())) }.boxed())
            .await;
        assert!(failed.is_err());

        let id = db
            .scoped(|session| {
                async move { session.postings().add_one(&posting("After", "/after")).await }.boxed()
            })
            .await
            .unwrap();
        assert!(id > 0);
    }
}
