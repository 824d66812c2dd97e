//! Repository for the `papers` table
//!
//! List fields are stored comma-joined and split back on read; an element
//! containing a comma does not survive the round trip.

use crate::config::DatabaseConfig;
use crate::db::models::*;
use crate::db::DbConnector;
use crate::errors::Result;
use crate::metrics;
use crate::models::{IngestOutcome, PaperRecord};
use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    Statement, TransactionTrait,
};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Delimiter used for `authors` and `citations`
pub const LIST_DELIMITER: char = ',';

const CREATE_PAPERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS papers (
        doi TEXT PRIMARY KEY,
        title TEXT,
        authors TEXT,
        content TEXT,
        citations TEXT,
        source TEXT,
        ingestion_date DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const UPSERT_PAPER: &str = r#"
    INSERT OR REPLACE INTO papers (doi, title, authors, content, citations, source)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

/// Repository for paper records
#[derive(Debug, Clone)]
pub struct PaperRepository {
    connector: DbConnector,
}

impl PaperRepository {
    /// Create a repository and make sure the table exists
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let repo = Self {
            connector: DbConnector::new(config),
        };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create the `papers` table if absent. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<()> {
        let conn = self.connector.connect().await?;
        let result = conn.execute_unprepared(CREATE_PAPERS_TABLE).await;
        self.connector.release(conn).await;
        result?;

        info!(url = %self.connector.url(), "Record store initialized");
        Ok(())
    }

    /// Ping the store
    pub async fn ping(&self) -> Result<()> {
        let conn = self.connector.connect().await?;
        let result = conn.execute_unprepared("SELECT 1").await;
        self.connector.release(conn).await;
        result?;
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Every stored record, in storage order
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Vec<PaperRecord>> {
        let start = Instant::now();
        let conn = self.connector.connect().await?;
        let rows = PaperEntity::find().all(&conn).await;
        self.connector.release(conn).await;

        metrics::record_store_operation("load_all", start.elapsed().as_secs_f64());

        let rows = rows.map_err(|e| {
            error!(error = %e, "Failed to load papers");
            e
        })?;

        debug!(count = rows.len(), "Papers loaded");
        Ok(rows.into_iter().map(PaperRecord::from).collect())
    }

    /// Look up one record by DOI
    pub async fn find_by_doi(&self, doi: &str) -> Result<Option<PaperRecord>> {
        let conn = self.connector.connect().await?;
        let row = PaperEntity::find_by_id(doi.to_string()).one(&conn).await;
        self.connector.release(conn).await;

        Ok(row?.map(PaperRecord::from))
    }

    /// Records whose `ingestion_date` is at or after `cutoff`
    pub async fn find_since(&self, cutoff: NaiveDateTime) -> Result<Vec<PaperRecord>> {
        let start = Instant::now();
        let conn = self.connector.connect().await?;
        let rows = PaperEntity::find()
            .filter(PaperColumn::IngestionDate.gte(cutoff))
            .all(&conn)
            .await;
        self.connector.release(conn).await;

        metrics::record_store_operation("find_since", start.elapsed().as_secs_f64());
        Ok(rows?.into_iter().map(PaperRecord::from).collect())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert-or-replace keyed on `doi`.
    ///
    /// A replace discards every column of the previous row; `ingestion_date`
    /// is reassigned by the column default. Failures roll back and come back
    /// as `IngestOutcome::Error`.
    #[instrument(skip(self, record), fields(doi = %record.doi))]
    pub async fn upsert(&self, record: &PaperRecord) -> IngestOutcome {
        let start = Instant::now();

        let outcome = match self.write(record).await {
            Ok(()) => {
                info!(title = %record.title, "Paper stored");
                IngestOutcome::Success {
                    doi: record.doi.clone(),
                    title: record.title.clone(),
                }
            }
            Err(e) => {
                error!(error = %e, "Paper upsert failed");
                IngestOutcome::failure(e.code(), e.to_string())
            }
        };

        metrics::record_store_operation("upsert", start.elapsed().as_secs_f64());
        outcome
    }

    async fn write(&self, record: &PaperRecord) -> Result<()> {
        let conn = self.connector.connect().await?;
        let result = Self::write_in_transaction(&conn, record).await;
        self.connector.release(conn).await;
        result
    }

    async fn write_in_transaction(conn: &DatabaseConnection, record: &PaperRecord) -> Result<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            UPSERT_PAPER,
            vec![
                record.doi.clone().into(),
                record.title.clone().into(),
                join_list(&record.authors).into(),
                record.content.clone().into(),
                join_list(&record.citations).into(),
                record.source.clone().into(),
            ],
        );

        let txn = conn.begin().await?;
        match txn.execute(stmt).await {
            Ok(_) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }
}

/// Join a list field for storage
pub fn join_list(items: &[String]) -> String {
    items.join(&LIST_DELIMITER.to_string())
}

/// Split a stored list field; an empty string is an empty list
pub fn split_list(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(LIST_DELIMITER).map(str::to_string).collect()
}

impl From<PaperRow> for PaperRecord {
    fn from(row: PaperRow) -> Self {
        PaperRecord {
            doi: row.doi,
            title: row.title.unwrap_or_default(),
            authors: split_list(row.authors.as_deref().unwrap_or_default()),
            content: row.content.unwrap_or_default(),
            citations: split_list(row.citations.as_deref().unwrap_or_default()),
            source: row.source.unwrap_or_default(),
            ingestion_date: row.ingestion_date,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A config pointing at a fresh SQLite file in the temp dir
    pub fn temp_database_config() -> DatabaseConfig {
        let path = std::env::temp_dir().join(format!("litexplorer-{}.db", uuid::Uuid::new_v4()));
        DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            connect_timeout_secs: 5,
        }
    }

    pub async fn temp_repository() -> PaperRepository {
        PaperRepository::open(&temp_database_config())
            .await
            .expect("temp store should open")
    }

    /// Backdate one row's `ingestion_date`
    pub async fn backdate(repo: &PaperRepository, doi: &str, date: &str) {
        let conn = repo.connector.connect().await.unwrap();
        conn.execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "UPDATE papers SET ingestion_date = ? WHERE doi = ?",
            vec![date.into(), doi.into()],
        ))
        .await
        .unwrap();
        repo.connector.release(conn).await;
    }
}
