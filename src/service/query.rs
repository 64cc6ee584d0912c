//! Turn a [`QueryBuf`] into a bound sqlx query. Every statement is logged at debug level.

use crate::sql::QueryBuf;
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::FromRow;

pub(crate) fn rows<'q, O>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query_as::<_, O>(&q.sql), |query, p| query.bind(p))
}

pub(crate) fn scalar<'q, O>(q: &'q QueryBuf) -> QueryScalar<'q, Postgres, O, PgArguments>
where
    (O,): for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query_scalar::<_, O>(&q.sql), |query, p| query.bind(p))
}

pub(crate) fn statement(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query(&q.sql), |query, p| query.bind(p))
}
