//! Row types for the `status` and `blog` tables and the request bodies that write them.
//!
//! Request bodies keep every column optional: missing values are handed to the store,
//! which rejects them as NOT NULL violations like the database would.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A lifecycle stage a blog post can be in (e.g. "Published").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Status {
    pub id: i32,
    pub label: String,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewStatus {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    /// Defaults to `true` when omitted.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewStatus {
    pub fn is_active_or_default(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// A stored blog post without its status relation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub status_id: i32,
    pub created_date_time: DateTime<Utc>,
    pub updated_date_time: DateTime<Utc>,
}

/// Blog joined with the status row its `statusId` points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogWithStatus {
    #[serde(flatten)]
    pub blog: Blog,
    /// `null` when `statusId` references no status row.
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status_id: Option<i32>,
}

/// Partial update: `None` (absent or `null`) keeps the stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status_id: Option<i32>,
}

impl BlogChanges {
    /// Applies the present fields to `blog`; timestamps are left to the store.
    pub fn apply_to(&self, blog: &mut Blog) {
        if let Some(title) = &self.title {
            blog.title = title.clone();
        }
        if let Some(content) = &self.content {
            blog.content = content.clone();
        }
        if let Some(status_id) = self.status_id {
            blog.status_id = status_id;
        }
    }
}
