/// Result type alias for dataset store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Row {row} has a negative like count: {value}")]
    InvalidLikeCount { row: usize, value: i64 },
}
