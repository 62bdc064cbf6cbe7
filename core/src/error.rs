use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data integrity violation in {table} (id {id}): {detail}")]
    DataIntegrity {
        table: &'static str,
        id: i64,
        detail: String,
    },

    #[error("Division by zero while computing {metric}")]
    DivisionByZero { metric: &'static str },

    #[error("Empty population: no rows available for {metric}")]
    EmptyPopulation { metric: &'static str },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
