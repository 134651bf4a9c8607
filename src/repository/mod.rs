//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookUpdate, NewBook},
};

/// Storage operations on books. Each call is a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by ISBN
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book>;

    /// Insert a new row; a taken ISBN yields `AppError::Conflict`
    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    /// Replace every column except the ISBN
    async fn update(&self, isbn: &str, data: &BookUpdate) -> AppResult<Book>;

    async fn delete(&self, isbn: &str) -> AppResult<()>;

    /// Round-trip to storage, used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Release every pooled connection. Called once on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
