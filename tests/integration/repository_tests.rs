//! Repository tests against the database at DATABASE_URL

use sqlx::postgres::PgPoolOptions;

use bookshelf_server::{
    error::AppError,
    models::book::{Book, BookUpdate, NewBook},
    repository::{BookStore, Repository},
};

async fn connect() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

fn new_book(isbn: &str) -> NewBook {
    NewBook {
        isbn: isbn.to_string(),
        amazon_url: "https://scooby.com".to_string(),
        author: "Jenkins".to_string(),
        language: "English".to_string(),
        pages: 5,
        publisher: "Goldie Publishes, inc.".to_string(),
        title: "How to get some bones".to_string(),
        year: 2022,
    }
}

/// Insert a fresh row and hand back its ISBN
async fn setup(repo: &Repository, isbn: &str) -> String {
    let _ = repo.books.delete(isbn).await;
    repo.books.create(&new_book(isbn)).await.expect("insert failed").isbn
}

async fn teardown(repo: Repository, isbn: &str) {
    let _ = repo.books.delete(isbn).await;
    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn test_create_then_get_round_trips() {
    let repo = connect().await;
    let isbn = setup(&repo, "repo-rt-0001").await;

    let stored = repo.books.get_by_isbn(&isbn).await.unwrap();
    assert_eq!(stored, Book::from(new_book(&isbn)));

    teardown(repo, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_insert_conflicts() {
    let repo = connect().await;
    let isbn = setup(&repo, "repo-dup-0001").await;

    let mut other = new_book(&isbn);
    other.title = "Another title".to_string();
    let err = repo.books.create(&other).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    teardown(repo, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_update_missing_row_is_not_found() {
    let repo = connect().await;

    let update = BookUpdate {
        amazon_url: "https://scooby.com".to_string(),
        author: "Jenkins".to_string(),
        language: "English".to_string(),
        pages: 100,
        publisher: "Goldie Publishes, inc.".to_string(),
        title: "How to get some bones".to_string(),
        year: 2022,
    };
    let err = repo.books.update("repo-none-0001", &update).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    repo.close().await;
}

#[tokio::test]
#[ignore]
async fn test_delete_twice() {
    let repo = connect().await;
    let isbn = setup(&repo, "repo-del-0001").await;

    repo.books.delete(&isbn).await.unwrap();
    let err = repo.books.delete(&isbn).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    repo.close().await;
}
