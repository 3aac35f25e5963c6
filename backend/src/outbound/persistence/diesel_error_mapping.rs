//! Shared Diesel error mapping for the mentorship repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constructors a repository error type offers to the shared mapper.
pub(crate) struct ErrorConstructors<Q, C, U> {
    pub query: Q,
    pub connection: C,
    /// Built when the statement hits a unique constraint.
    pub unique: U,
}

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map a Diesel error, logging the database error kind without row data.
pub(crate) fn map_diesel_error<E, Q, C, U>(
    error: DieselError,
    constructors: ErrorConstructors<Q, C, U>,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    U: FnOnce() -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    let ErrorConstructors {
        query,
        connection,
        unique,
    } = constructors;
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => unique(),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}
