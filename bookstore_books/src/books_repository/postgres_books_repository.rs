use anyhow::Context;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row, Statement};

use crate::api::Book;
use crate::books_repository::{BooksRepository, BooksRepositoryError};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

pub struct PostgresBooksRepository {
    client: Client,
}

pub struct PostgresBooksRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl PostgresBooksRepository {
    pub async fn init(config: PostgresBooksRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}/{}",
            config.username, config.password, config.hostname, config.database
        );
        tracing::info!(
            "Connecting to postgres at {}/{}",
            config.hostname,
            config.database
        );
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Postgres connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS books (
            isbn            TEXT PRIMARY KEY,
            amazon_url      TEXT NOT NULL,
            author          TEXT NOT NULL,
            language        TEXT NOT NULL,
            pages           INTEGER NOT NULL,
            publisher       TEXT NOT NULL,
            title           TEXT NOT NULL,
            year            INTEGER NOT NULL
            )
        ",
            )
            .await
            .context("Failed to setup table")?;
        Ok(Self { client })
    }
}

fn book_from_row(row: &Row) -> Result<Book, tokio_postgres::Error> {
    Ok(Book {
        isbn: row.try_get("isbn")?,
        amazon_url: row.try_get("amazon_url")?,
        author: row.try_get("author")?,
        language: row.try_get("language")?,
        pages: row.try_get("pages")?,
        publisher: row.try_get("publisher")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
    })
}

#[async_trait::async_trait]
impl BooksRepository for PostgresBooksRepository {
    async fn create_book(&self, book: Book) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "INSERT INTO books ({BOOK_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let row = self
            .client
            .query_one(
                &stmt,
                &[
                    &book.isbn,
                    &book.amazon_url,
                    &book.author,
                    &book.language,
                    &book.pages,
                    &book.publisher,
                    &book.title,
                    &book.year,
                ],
            )
            .await
            .map_err(|err| match err.code() {
                Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                    BooksRepositoryError::AlreadyExists(book.isbn.clone())
                }
                _ => err.into(),
            })?;

        Ok(book_from_row(&row)?)
    }

    async fn get_book(&self, isbn: &str) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE isbn = ($1)"))
            .await?;

        let rows = self.client.query(&stmt, &[&isbn]).await?;

        let row = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;

        Ok(book_from_row(row)?)
    }

    async fn list_books(&self) -> Result<Vec<Book>, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY isbn"))
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| Ok(book_from_row(row)?))
            .collect()
    }

    async fn update_book(&self, isbn: &str, book: Book) -> Result<Book, BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(&format!(
                "UPDATE books SET amazon_url = $1, author = $2, language = $3, pages = $4, \
                 publisher = $5, title = $6, year = $7 WHERE isbn = ($8) RETURNING {BOOK_COLUMNS}"
            ))
            .await?;

        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &book.amazon_url,
                    &book.author,
                    &book.language,
                    &book.pages,
                    &book.publisher,
                    &book.title,
                    &book.year,
                    &isbn,
                ],
            )
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;

        Ok(book_from_row(row)?)
    }

    async fn delete_book(&self, isbn: &str) -> Result<(), BooksRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM books WHERE isbn = ($1) RETURNING isbn")
            .await?;

        let rows = self.client.query(&stmt, &[&isbn]).await?;
        if rows.is_empty() {
            Err(BooksRepositoryError::NotFound(isbn.to_string()))
        } else {
            Ok(())
        }
    }
}
