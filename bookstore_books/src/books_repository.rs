pub use in_memory_books_repository::InMemoryBooksRepository;
pub use postgres_books_repository::{PostgresBooksRepository, PostgresBooksRepositoryConfig};

use crate::api::{Book, Isbn};

mod in_memory_books_repository;
mod postgres_books_repository;

#[derive(thiserror::Error, Debug)]
pub enum BooksRepositoryError {
    #[error("Book {0} not found")]
    NotFound(Isbn),

    #[error("Book {0} already exists")]
    AlreadyExists(Isbn),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),
}

#[async_trait::async_trait]
pub trait BooksRepository: Send + Sync {
    /// Adds book to repository, fails if a book with the same isbn is already there
    async fn create_book(&self, book: Book) -> Result<Book, BooksRepositoryError>;
    /// Retrieves the book with given isbn
    async fn get_book(&self, isbn: &str) -> Result<Book, BooksRepositoryError>;
    /// Lists all books in the repository ordered by isbn
    async fn list_books(&self) -> Result<Vec<Book>, BooksRepositoryError>;
    /// Replaces every field of the book stored under `isbn`, the isbn itself is kept
    async fn update_book(&self, isbn: &str, book: Book) -> Result<Book, BooksRepositoryError>;
    /// Removes the book with given isbn
    async fn delete_book(&self, isbn: &str) -> Result<(), BooksRepositoryError>;
}
