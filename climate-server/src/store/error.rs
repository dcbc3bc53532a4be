//! Data access error types.

/// Errors from opening or querying the observation database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Expected table missing from the live schema
    #[error("schema mismatch: table `{table}` not found")]
    MissingTable { table: &'static str },

    /// Expected column missing from the live schema
    #[error("schema mismatch: table `{table}` has no column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}
