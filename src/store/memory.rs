//! In-process store for tests and local runs.
//!
//! Mirrors the PostgreSQL schema's behaviour: serial ids starting at 1, NOT NULL columns,
//! the `statusId` foreign key and store-assigned timestamps. Error texts follow PostgreSQL's.

use super::BlogStore;
use crate::error::AppError;
use crate::model::{Blog, BlogChanges, BlogWithStatus, NewBlog, NewStatus, Status};
use crate::publication::{project_published, PublicationFilter, PublishedBlog};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    statuses: Vec<Status>,
    blogs: Vec<Blog>,
    status_seq: i32,
    blog_seq: i32,
}

impl Tables {
    fn status(&self, id: i32) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    fn check_status_fk(&self, status_id: i32) -> Result<(), AppError> {
        if self.status(status_id).is_none() {
            return Err(AppError::DataAccess(
                "insert or update on table \"blog\" violates foreign key constraint \"blog_statusId_fkey\"".into(),
            ));
        }
        Ok(())
    }

    fn with_status(&self, blog: &Blog) -> BlogWithStatus {
        BlogWithStatus {
            blog: blog.clone(),
            status: self.status(blog.status_id).cloned(),
        }
    }
}

fn not_null<T>(value: Option<T>, table: &str, column: &str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::DataAccess(format!(
            "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
            column, table
        ))
    })
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::DataAccess("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::DataAccess("lock poisoned".into()))
    }

    /// Number of stored blog rows.
    pub fn blog_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.blogs.len())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_statuses(&self) -> Result<Vec<Status>, AppError> {
        Ok(self.read()?.statuses.clone())
    }

    async fn create_status(&self, status: &NewStatus) -> Result<Status, AppError> {
        let label = not_null(status.label.clone(), "status", "label")?;
        let order = not_null(status.order, "status", "order")?;
        let mut tables = self.write()?;
        tables.status_seq += 1;
        let row = Status {
            id: tables.status_seq,
            label,
            order,
            is_active: status.is_active_or_default(),
        };
        tables.statuses.push(row.clone());
        Ok(row)
    }

    async fn list_blogs(&self) -> Result<Vec<BlogWithStatus>, AppError> {
        let tables = self.read()?;
        Ok(tables.blogs.iter().map(|b| tables.with_status(b)).collect())
    }

    async fn get_blog(&self, id: i32) -> Result<Option<BlogWithStatus>, AppError> {
        let tables = self.read()?;
        Ok(tables.blogs.iter().find(|b| b.id == id).map(|b| tables.with_status(b)))
    }

    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError> {
        let title = not_null(blog.title.clone(), "blog", "title")?;
        let content = not_null(blog.content.clone(), "blog", "content")?;
        let status_id = not_null(blog.status_id, "blog", "statusId")?;
        let mut tables = self.write()?;
        tables.check_status_fk(status_id)?;
        tables.blog_seq += 1;
        let now = Utc::now();
        let row = Blog {
            id: tables.blog_seq,
            title,
            content,
            status_id,
            created_date_time: now,
            updated_date_time: now,
        };
        tables.blogs.push(row.clone());
        Ok(row)
    }

    async fn update_blog(&self, id: i32, changes: &BlogChanges) -> Result<Option<Blog>, AppError> {
        let mut tables = self.write()?;
        // An UPDATE that matches no row never reaches the foreign key.
        let Some(pos) = tables.blogs.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(status_id) = changes.status_id {
            tables.check_status_fk(status_id)?;
        }
        let row = &mut tables.blogs[pos];
        changes.apply_to(row);
        row.updated_date_time = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_blog(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let before = tables.blogs.len();
        tables.blogs.retain(|b| b.id != id);
        Ok(tables.blogs.len() < before)
    }

    async fn list_published(&self, filter: &PublicationFilter) -> Result<Vec<PublishedBlog>, AppError> {
        Ok(project_published(&self.read()?.blogs, filter))
    }
}
