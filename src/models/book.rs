//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// ISBN, primary key; immutable once created
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    /// Page count, always positive
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    /// Publication year, never in the future
    pub year: i32,
}

/// Create book request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewBook {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Full update request; every field except the ISBN is replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookUpdate {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl BookUpdate {
    /// Build the record that results from applying this update to `isbn`
    pub fn into_book(self, isbn: impl Into<String>) -> Book {
        Book {
            isbn: isbn.into(),
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

impl From<NewBook> for Book {
    fn from(data: NewBook) -> Self {
        Self {
            isbn: data.isbn,
            amazon_url: data.amazon_url,
            author: data.author,
            language: data.language,
            pages: data.pages,
            publisher: data.publisher,
            title: data.title,
            year: data.year,
        }
    }
}

/// `{ "books": [...] }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// `{ "book": {...} }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// `{ "message": "..." }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
