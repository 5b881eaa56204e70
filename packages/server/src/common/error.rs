use thiserror::Error;

/// Typed failure taxonomy for the scheduling and booking engine.
///
/// Every expected business condition is returned as one of these variants;
/// only persistence-layer outages surface as `Database`. The engine performs
/// no internal retries - a lost capacity race comes back as `Conflict` and
/// retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Remap a unique-constraint violation to a business `Conflict`.
    ///
    /// The reservation uniqueness indexes double as concurrency backstops;
    /// when two requests race past the in-action checks, the loser's insert
    /// fails with a unique violation that callers should see as Conflict,
    /// not as a persistence outage.
    pub fn unique_as_conflict(err: sqlx::Error, msg: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(msg.to_string())
            }
            _ => Self::Database(err),
        }
    }

    /// Helper for `fetch_optional`-style lookups.
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound(entity)
    }
}
