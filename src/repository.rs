//! Storage of call batches.

use crate::callibri_types::CallRecord;
use crate::db_types::CallRow;
use crate::error::{handle_error, StorageError};

use sqlx::{PgConnection, Pool, Postgres};
use tracing::{debug, error, info};

const INSERT_CALL: &str = "
    insert into calls (
      \"date\",
      phone,
      status,
      comment,
      link_download,
      call_status,
      name,
      is_lid,
      region,
      accurately,
      responsible_manager,
      lid_catcher
    ) values (
      $1,
      $2,
      $3,
      $4,
      $5,
      $6,
      $7,
      $8,
      $9,
      $10,
      $11,
      $12
    )
    ";

#[derive(Clone)]
pub struct CallRepository {
    pool: Pool<Postgres>,
}

impl CallRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Store `records` in one transaction, in order. Either every record is committed or, on the
    /// first failure, the whole batch is rolled back and that failure is returned.
    pub async fn save(&self, records: &[CallRecord]) -> Result<usize, StorageError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error=%e, "failed to begin transaction");
            StorageError::from(e)
        })?;

        for (idx, record) in records.iter().enumerate() {
            if let Err(e) = insert_call(&mut *tx, record).await {
                error!(error=%e, idx, "failed to insert call row; rolling back batch");
                if let Err(rollback_err) = tx.rollback().await {
                    handle_error(&rollback_err);
                }
                return Err(e);
            }
        }

        tx.commit().await.map_err(|e| {
            error!(error=%e, "failed to commit transaction");
            StorageError::from(e)
        })?;
        info!(rows = records.len(), "saved call batch");

        Ok(records.len())
    }
}

async fn insert_call(conn: &mut PgConnection, record: &CallRecord) -> Result<(), StorageError> {
    let row = CallRow::try_from(record)?;
    debug!(phone = %row.phone, date = %row.date, "inserting call");
    sqlx::query(INSERT_CALL)
        .bind(row.date)
        .bind(row.phone)
        .bind(row.status)
        .bind(row.comment)
        .bind(row.link_download)
        .bind(row.call_status)
        .bind(row.name)
        .bind(row.is_lid)
        .bind(row.region)
        .bind(row.accurately)
        .bind(row.responsible_manager)
        .bind(row.lid_catcher)
        .execute(conn)
        .await?;

    Ok(())
}
