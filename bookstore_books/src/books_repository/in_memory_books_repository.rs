use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::api::{Book, Isbn};
use crate::books_repository::{BooksRepository, BooksRepositoryError};

#[derive(Default)]
pub struct InMemoryBooksRepository {
    books: parking_lot::RwLock<BTreeMap<Isbn, Book>>,
}

#[async_trait::async_trait]
impl BooksRepository for InMemoryBooksRepository {
    async fn create_book(&self, book: Book) -> Result<Book, BooksRepositoryError> {
        match self.books.write().entry(book.isbn.clone()) {
            Entry::Occupied(_) => Err(BooksRepositoryError::AlreadyExists(book.isbn)),
            Entry::Vacant(entry) => Ok(entry.insert(book).clone()),
        }
    }

    async fn get_book(&self, isbn: &str) -> Result<Book, BooksRepositoryError> {
        self.books
            .read()
            .get(isbn)
            .cloned()
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))
    }

    async fn list_books(&self) -> Result<Vec<Book>, BooksRepositoryError> {
        Ok(self.books.read().values().cloned().collect())
    }

    async fn update_book(&self, isbn: &str, book: Book) -> Result<Book, BooksRepositoryError> {
        let mut locked_books = self.books.write();
        let stored = locked_books
            .get_mut(isbn)
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))?;
        *stored = Book {
            isbn: isbn.to_string(),
            ..book
        };
        Ok(stored.clone())
    }

    async fn delete_book(&self, isbn: &str) -> Result<(), BooksRepositoryError> {
        self.books
            .write()
            .remove(isbn)
            .map(|_| ())
            .ok_or_else(|| BooksRepositoryError::NotFound(isbn.to_string()))
    }
}
