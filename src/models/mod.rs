//! Data models for Bookshelf

pub mod book;

pub use book::{Book, BookResponse, BookUpdate, BooksResponse, MessageResponse, NewBook};
