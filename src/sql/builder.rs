//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the `status` and `blog` tables.

use super::params::BindValue;
use crate::model::{BlogChanges, NewBlog, NewStatus};
use crate::publication::{PublicationFilter, PUBLISHED_STATUS_ID};

pub const STATUS_TABLE: &str = "status";
pub const BLOG_TABLE: &str = "blog";

const BLOG_COLUMNS: &[&str] = &["id", "title", "content", "statusId", "createdDateTime", "updatedDateTime"];
const STATUS_COLUMNS: &[&str] = &["id", "label", "order", "is_active"];

/// Alias prefix for joined status columns in blog reads.
pub const STATUS_ALIAS_PREFIX: &str = "status_";

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

fn column_list(columns: &[&str], alias: Option<&str>) -> String {
    columns
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{}.{}", a, quoted(c)),
            None => quoted(c),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escapes LIKE metacharacters (`\`, `%`, `_`) and wraps the term for a substring match.
/// Pair with `ESCAPE '\'`.
pub fn like_contains(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// SELECT all statuses in storage order.
pub fn select_statuses(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(STATUS_COLUMNS, None),
        qualified_table(schema, STATUS_TABLE),
        quoted("id")
    );
    q
}

/// INSERT one status, returning the stored row. `is_active` falls back to `true`.
pub fn insert_status(schema: &str, status: &NewStatus) -> QueryBuf {
    let mut q = QueryBuf::new();
    let label = q.push_param(status.label.clone());
    let order = q.push_param(status.order);
    let is_active = q.push_param(status.is_active_or_default());
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}) VALUES (${}, ${}, ${}) RETURNING {}",
        qualified_table(schema, STATUS_TABLE),
        quoted("label"),
        quoted("order"),
        quoted("is_active"),
        label,
        order,
        is_active,
        column_list(STATUS_COLUMNS, None)
    );
    q
}

/// SELECT blogs LEFT JOINed with their status, optionally restricted to one id.
/// Status columns come back as `status_<column>`.
pub fn select_blogs_with_status(schema: &str, id: Option<i32>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let status_cols = STATUS_COLUMNS
        .iter()
        .map(|c| format!("s.{} AS {}", quoted(c), quoted(&format!("{}{}", STATUS_ALIAS_PREFIX, c))))
        .collect::<Vec<_>>()
        .join(", ");
    let where_clause = match id {
        Some(id) => format!(" WHERE b.{} = ${}", quoted("id"), q.push_param(id)),
        None => String::new(),
    };
    q.sql = format!(
        "SELECT {}, {} FROM {} b LEFT JOIN {} s ON s.{} = b.{}{} ORDER BY b.{}",
        column_list(BLOG_COLUMNS, Some("b")),
        status_cols,
        qualified_table(schema, BLOG_TABLE),
        qualified_table(schema, STATUS_TABLE),
        quoted("id"),
        quoted("statusId"),
        where_clause,
        quoted("id")
    );
    q
}

/// INSERT one blog; timestamps take their column defaults.
pub fn insert_blog(schema: &str, blog: &NewBlog) -> QueryBuf {
    let mut q = QueryBuf::new();
    let title = q.push_param(blog.title.clone());
    let content = q.push_param(blog.content.clone());
    let status_id = q.push_param(blog.status_id);
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}) VALUES (${}, ${}, ${}) RETURNING {}",
        qualified_table(schema, BLOG_TABLE),
        quoted("title"),
        quoted("content"),
        quoted("statusId"),
        title,
        content,
        status_id,
        column_list(BLOG_COLUMNS, None)
    );
    q
}

/// UPDATE one blog by id. Absent fields keep their value via COALESCE; `updatedDateTime` is refreshed.
pub fn update_blog(schema: &str, id: i32, changes: &BlogChanges) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_ph = q.push_param(id);
    let mut sets = Vec::new();
    for (col, value) in [
        ("title", BindValue::from(changes.title.clone())),
        ("content", BindValue::from(changes.content.clone())),
        ("statusId", BindValue::from(changes.status_id)),
    ] {
        let n = q.push_param(value);
        sets.push(format!("{c} = COALESCE(${n}, {c})", c = quoted(col), n = n));
    }
    sets.push(format!("{} = NOW()", quoted("updatedDateTime")));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, BLOG_TABLE),
        sets.join(", "),
        quoted("id"),
        id_ph,
        column_list(BLOG_COLUMNS, None)
    );
    q
}

/// DELETE one blog by id. Caller checks rows affected.
pub fn delete_blog(schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        qualified_table(schema, BLOG_TABLE),
        quoted("id"),
        n
    );
    q
}

/// SELECT the published projection, narrowed by the filter's present terms (ILIKE, ANDed).
pub fn select_published(schema: &str, filter: &PublicationFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = vec![format!("{} = ${}", quoted("statusId"), q.push_param(PUBLISHED_STATUS_ID))];
    if let Some(term) = filter.title_term() {
        let n = q.push_param(like_contains(term));
        where_parts.push(format!("{} ILIKE ${} ESCAPE '\\'", quoted("title"), n));
    }
    if let Some(term) = filter.content_term() {
        let n = q.push_param(like_contains(term));
        where_parts.push(format!("{} ILIKE ${} ESCAPE '\\'", quoted("content"), n));
    }
    q.sql = format!(
        "SELECT {}, {} AS {}, {}, {} FROM {} WHERE {} ORDER BY {}",
        quoted("id"),
        quoted("title"),
        quoted("titulo"),
        quoted("createdDateTime"),
        quoted("updatedDateTime"),
        qualified_table(schema, BLOG_TABLE),
        where_parts.join(" AND "),
        quoted("id")
    );
    q
}
