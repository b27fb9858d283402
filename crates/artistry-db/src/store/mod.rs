//! Data-access layer. One function per operation per entity, generic over
//! [`sea_orm::ConnectionTrait`] so handlers inject the pooled connection and
//! tests can substitute their own.
//!
//! Every operation returns `Result<T, StoreError>`: the success payload or a
//! discriminated error the request layer maps onto an HTTP status.

use sea_orm::{DbErr, SqlErr, TransactionError};

pub mod artists;
pub mod music;
pub mod users;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Uniqueness conflict on the email column; surfaces as a 400 with the
    /// field error `{"email": ["This email already exists."]}`.
    #[error("This email already exists.")]
    EmailTaken,
    /// A user may own at most one artist profile; surfaces as a 400.
    #[error("Artist profile already exists for this user.")]
    ProfileExists,
    /// No row matched; surfaces as a 404.
    #[error("record not found")]
    NotFound,
    /// Unclassified database failure; surfaces as a generic 500.
    #[error(transparent)]
    Db(#[from] DbErr),
}

fn classify(sql_err: Option<SqlErr>, err: DbErr, conflict: StoreError) -> StoreError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => StoreError::Db(err),
    }
}

/// Map a write failure: a unique-constraint violation becomes `conflict`,
/// anything else stays a raw database error. Covers the race the pre-checks
/// leave open between the existence lookup and the write.
pub(crate) fn unique_conflict(err: DbErr, conflict: StoreError) -> StoreError {
    let sql_err = err.sql_err();
    classify(sql_err, err, conflict)
}

impl From<TransactionError<StoreError>> for StoreError {
    fn from(err: TransactionError<StoreError>) -> Self {
        match err {
            TransactionError::Connection(db) => StoreError::Db(db),
            TransactionError::Transaction(inner) => inner,
        }
    }
}
