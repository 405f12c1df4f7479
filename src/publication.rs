//! Publication filter: the public read path over published blog posts.
//!
//! A post is published when its `statusId` equals [`PUBLISHED_STATUS_ID`]. Search narrows
//! the published set with case-insensitive substring matches on title and/or content;
//! both predicates are ANDed and an empty value counts as absent.

use crate::model::Blog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Status id that marks a post as publicly visible.
pub const PUBLISHED_STATUS_ID: i32 = 1;

/// Optional search terms for `/blog-alunos/busca`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicationFilter {
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub title: Option<String>,
    /// Case-insensitive substring of the content.
    #[serde(default)]
    pub content: Option<String>,
}

impl PublicationFilter {
    pub fn title_term(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn content_term(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.title_term().is_none() && self.content_term().is_none()
    }

    /// True when `blog` is published and satisfies every present term.
    pub fn matches(&self, blog: &Blog) -> bool {
        if blog.status_id != PUBLISHED_STATUS_ID {
            return false;
        }
        if let Some(term) = self.title_term() {
            if !contains_ignore_case(&blog.title, term) {
                return false;
            }
        }
        if let Some(term) = self.content_term() {
            if !contains_ignore_case(&blog.content, term) {
                return false;
            }
        }
        true
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Reduced public view of a published post. `title` is exposed as `titulo` and content is omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct PublishedBlog {
    pub id: i32,
    pub titulo: String,
    pub created_date_time: DateTime<Utc>,
    pub updated_date_time: DateTime<Utc>,
}

impl From<&Blog> for PublishedBlog {
    fn from(blog: &Blog) -> Self {
        PublishedBlog {
            id: blog.id,
            titulo: blog.title.clone(),
            created_date_time: blog.created_date_time,
            updated_date_time: blog.updated_date_time,
        }
    }
}

impl From<Blog> for PublishedBlog {
    fn from(blog: Blog) -> Self {
        PublishedBlog {
            id: blog.id,
            titulo: blog.title,
            created_date_time: blog.created_date_time,
            updated_date_time: blog.updated_date_time,
        }
    }
}

/// Applies `filter` to `blogs` and projects the survivors, keeping input order.
pub fn project_published<'a, I>(blogs: I, filter: &PublicationFilter) -> Vec<PublishedBlog>
where
    I: IntoIterator<Item = &'a Blog>,
{
    blogs
        .into_iter()
        .filter(|b| filter.matches(b))
        .map(PublishedBlog::from)
        .collect()
}
