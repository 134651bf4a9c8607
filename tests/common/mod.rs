//! Shared fixtures for router tests

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{self, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api,
    error::{AppError, AppResult},
    models::book::{Book, BookUpdate, NewBook},
    repository::BookStore,
    AppState,
};

/// `BookStore` backed by a sorted map, standing in for the `books` table
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<String, Book>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<Book> {
        self.rows.lock().unwrap().values().cloned().collect()
    }
}

fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("There is no book with an isbn '{}'", isbn))
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.snapshot())
    }

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.rows
            .lock()
            .unwrap()
            .get(isbn)
            .cloned()
            .ok_or_else(|| not_found(isbn))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&data.isbn) {
            return Err(AppError::Conflict(format!(
                "A book with isbn '{}' already exists",
                data.isbn
            )));
        }
        let book = Book::from(data.clone());
        rows.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, data: &BookUpdate) -> AppResult<Book> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(isbn).ok_or_else(|| not_found(isbn))?;
        *row = data.clone().into_book(isbn);
        Ok(row.clone())
    }

    async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(isbn)
            .map(|_| ())
            .ok_or_else(|| not_found(isbn))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Fresh app over an empty store; the store handle is returned for inspection
pub fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone());
    (api::create_router(state), store)
}

pub fn sample_book() -> Value {
    json!({
        "isbn": "000030000",
        "amazon_url": "https://scooby.com",
        "author": "Jenkins",
        "language": "English",
        "pages": 5,
        "publisher": "Goldie Publishes, inc.",
        "title": "How to get some bones",
        "year": 2022
    })
}

/// Insert the sample book through the API and return its ISBN
pub async fn seed_book(app: &Router) -> String {
    let response = send(app, json_request("POST", "/books", &sample_book())).await;
    assert_eq!(response.status(), http::StatusCode::CREATED);
    let body = body_json(response).await;
    body["book"]["isbn"].as_str().unwrap().to_string()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
