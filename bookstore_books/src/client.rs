use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{Book, BookResponse, BooksResponse, ErrorBody, ErrorResponse};

pub struct BookstoreClient {
    url: String,
    client: ClientWithMiddleware,
}

impl BookstoreClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /books endpoint
    /// Returns the book as stored by the service
    pub async fn create_book(&self, book: &Book) -> anyhow::Result<Book> {
        match self.submit_book(&serde_json::to_value(book)?).await? {
            Ok(book) => Ok(book),
            Err(error) => bail!("Failed to create book {}: {}", error.status, error.message),
        }
    }

    /// Calls POST /books endpoint with an arbitrary body
    /// Returns the created book, or the error rendered by the service when it was rejected
    pub async fn submit_book(
        &self,
        body: &serde_json::Value,
    ) -> anyhow::Result<Result<Book, ErrorBody>> {
        let response = self
            .client
            .post(format!("{}/books", self.url))
            .json(body)
            .send()
            .await?;

        if response.status().is_success() {
            let created: BookResponse = response.json().await?;
            Ok(Ok(created.book))
        } else {
            let error: ErrorResponse = response
                .json()
                .await
                .context("Failed to read error response")?;
            Ok(Err(error.error))
        }
    }

    /// Calls GET /books/{isbn} endpoint
    /// Returns the book if it was present
    /// None if it was not in the repository
    /// and error in case of any other failure
    pub async fn get_book(&self, isbn: &str) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(format!("{}/books/{}", self.url, isbn))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            let found: BookResponse = response.json().await?;
            Ok(Some(found.book))
        } else {
            let error: String = response.text().await.unwrap_or_default();
            bail!("Failed to get book {}", error)
        }
    }

    /// Calls GET /books endpoint
    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let response = self
            .client
            .get(format!("{}/books", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let listed: BooksResponse = response.json().await?;
            Ok(listed.books)
        } else {
            let error: String = response.text().await.unwrap_or_default();
            bail!("Failed to list books {}", error)
        }
    }

    /// Calls PUT /books/{isbn} endpoint
    /// Returns the updated book, None if there was no book with given isbn
    pub async fn update_book(&self, isbn: &str, book: &Book) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .put(format!("{}/books/{}", self.url, isbn))
            .json(book)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            let updated: BookResponse = response.json().await?;
            Ok(Some(updated.book))
        } else {
            let error: String = response.text().await.unwrap_or_default();
            bail!("Failed to update book {}", error)
        }
    }

    /// Calls DELETE /books/{isbn} endpoint
    /// Returns true if the book was deleted and false if it was not found
    pub async fn delete_book(&self, isbn: &str) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/books/{}", self.url, isbn))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.text().await.unwrap_or_default();
            bail!("Failed to delete book {}", error)
        }
    }
}
