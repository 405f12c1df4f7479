//! Typed bind values carried alongside generated SQL.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A value bound to a `$n` placeholder. `None` binds SQL NULL of the column's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Int(Option<i32>),
    Text(Option<String>),
    Bool(Option<bool>),
}

impl From<i32> for BindValue {
    fn from(n: i32) -> Self {
        BindValue::Int(Some(n))
    }
}

impl From<Option<i32>> for BindValue {
    fn from(n: Option<i32>) -> Self {
        BindValue::Int(n)
    }
}

impl From<Option<String>> for BindValue {
    fn from(s: Option<String>) -> Self {
        BindValue::Text(s)
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(Some(s))
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(Some(b))
    }
}

/// Binds `params` in order onto a plain query.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[BindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p.clone() {
            BindValue::Int(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }
    query
}

/// Binds `params` in order onto a typed query.
pub fn bind_all_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p.clone() {
            BindValue::Int(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }
    query
}
