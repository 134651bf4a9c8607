//! Books service

use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::AppResult,
    models::book::Book,
    repository::BookStore,
    validation,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List every book
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list_all().await
    }

    /// Get a book by ISBN
    pub async fn get(&self, isbn: &str) -> AppResult<Book> {
        self.store.get_by_isbn(isbn).await
    }

    /// Validate a create payload and insert it
    pub async fn create(&self, payload: &Value) -> AppResult<Book> {
        let data = validation::validate_new_book(payload)?;
        let book = self.store.create(&data).await?;
        tracing::info!(isbn = %book.isbn, "Book created");
        Ok(book)
    }

    /// Validate an update payload and replace the stored fields
    pub async fn update(&self, isbn: &str, payload: &Value) -> AppResult<Book> {
        let data = validation::validate_book_update(payload)?;
        let book = self.store.update(isbn, &data).await?;
        tracing::info!(isbn = %book.isbn, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.store.delete(isbn).await?;
        tracing::info!(isbn, "Book deleted");
        Ok(())
    }

    /// Check that storage answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
