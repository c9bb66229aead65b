use async_trait::async_trait;
use sql_middleware::middleware::{
    ConfigAndPool, ConversionMode, MiddlewarePool, MiddlewarePoolConnection,
};
use sql_middleware::middleware::{QueryAndParams as QueryAndParams2, RowValues as RowValues2};
use sql_middleware::{
    SqlMiddlewareDbError, SqliteParamsExecute, SqliteParamsQuery, convert_sql_params,
};

use crate::model::ScoreRecord;
use crate::storage::{ScoreStore, StorageError, StoredScore};

/// # Errors
///
/// Will return `Err` if the database batch fails
pub async fn execute_batch_sql(
    config_and_pool: &ConfigAndPool,
    query: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let pool = config_and_pool.pool.get().await?;
    let conn = MiddlewarePool::get_connection(pool).await?;
    let script = query.to_string();

    match conn {
        MiddlewarePoolConnection::Postgres(mut pg_conn) => {
            let tx = pg_conn.transaction().await?;
            tx.batch_execute(&script).await?;
            tx.commit().await?;
            Ok(())
        }
        MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
            sqlite_conn
                .interact(move |db_conn| {
                    let tx = db_conn.transaction()?;
                    tx.execute_batch(&script)?;
                    tx.commit()?;
                    Ok::<_, SqlMiddlewareDbError>(())
                })
                .await?
        }
    }
}

/// Score log backed by the shared sql-middleware pool. Records are stored as
/// one JSON payload per row with a database-assigned creation timestamp.
#[derive(Clone)]
pub struct DbScoreStore {
    config_and_pool: ConfigAndPool,
}

impl DbScoreStore {
    #[must_use]
    pub fn new(config_and_pool: ConfigAndPool) -> Self {
        Self { config_and_pool }
    }

    async fn connection(&self) -> Result<MiddlewarePoolConnection, SqlMiddlewareDbError> {
        let pool = self.config_and_pool.pool.get().await?;
        MiddlewarePool::get_connection(pool).await
    }
}

#[async_trait]
impl ScoreStore for DbScoreStore {
    async fn append_score(
        &self,
        user_id: &str,
        record: &ScoreRecord,
    ) -> Result<i64, StorageError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| StorageError::new(format!("Failed to serialize record: {e}")))?;

        let conn = self
            .connection()
            .await
            .map_err(|e| StorageError::new(e.to_string()))?;

        let query_and_params = QueryAndParams2 {
            query: include_str!("../sql/functions/sqlite/01_sp_insert_score.sql").to_string(),
            params: vec![
                RowValues2::Text(user_id.to_string()),
                RowValues2::Text(payload),
            ],
        };

        let id = (match &conn {
            MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
                sqlite_conn
                    .interact(move |db_conn| {
                        let converted_params = convert_sql_params::<SqliteParamsExecute>(
                            &query_and_params.params,
                            ConversionMode::Execute,
                        )?;
                        let tx = db_conn.transaction()?;
                        let id = {
                            let mut stmt = tx.prepare(&query_and_params.query)?;
                            stmt.execute(converted_params.0)?;
                            tx.last_insert_rowid()
                        };
                        tx.commit()?;
                        Ok::<_, SqlMiddlewareDbError>(id)
                    })
                    .await
                    .map_err(|e| StorageError::new(e.to_string()))?
            }
            _ => Err(SqlMiddlewareDbError::Other(
                "Database type not supported for this operation".to_string(),
            )),
        })
        .map_err(|e| StorageError::new(e.to_string()))?;

        Ok(id)
    }

    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<StoredScore>, StorageError> {
        let conn = self
            .connection()
            .await
            .map_err(|e| StorageError::new(e.to_string()))?;

        let query_and_params = QueryAndParams2 {
            query: include_str!("../sql/functions/sqlite/02_sp_get_scores_for_user.sql")
                .to_string(),
            params: vec![RowValues2::Text(user_id.to_string())],
        };

        let result_set = (match &conn {
            MiddlewarePoolConnection::Sqlite(sqlite_conn) => {
                sqlite_conn
                    .interact(move |db_conn| {
                        let converted_params = convert_sql_params::<SqliteParamsQuery>(
                            &query_and_params.params,
                            ConversionMode::Query,
                        )?;
                        let tx = db_conn.transaction()?;
                        let result_set = {
                            let mut stmt = tx.prepare(&query_and_params.query)?;
                            sql_middleware::sqlite_build_result_set(&mut stmt, &converted_params.0)?
                        };
                        tx.commit()?;
                        Ok::<_, SqlMiddlewareDbError>(result_set)
                    })
                    .await
                    .map_err(|e| StorageError::new(e.to_string()))?
            }
            _ => Err(SqlMiddlewareDbError::Other(
                "Database type not supported for this operation".to_string(),
            )),
        })
        .map_err(|e| StorageError::new(e.to_string()))?;

        result_set
            .results
            .iter()
            .map(|row| {
                let id = row
                    .get("id")
                    .and_then(|v| v.as_int())
                    .copied()
                    .ok_or_else(|| StorageError::new("id not found"))?;
                let created_at = row
                    .get("created_at")
                    .and_then(|v| v.as_text())
                    .map(str::to_string)
                    .ok_or_else(|| StorageError::new("created_at not found"))?;
                let payload = row
                    .get("payload")
                    .and_then(|v| v.as_text())
                    .ok_or_else(|| StorageError::new("payload not found"))?;
                let record: ScoreRecord = serde_json::from_str(payload)
                    .map_err(|e| StorageError::new(format!("Failed to parse record: {e}")))?;
                Ok(StoredScore {
                    id,
                    created_at,
                    record,
                })
            })
            .collect()
    }
}
