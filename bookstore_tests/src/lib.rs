//! Black box tests running against a deployed bookstore service.
//!
//! Start the service (e.g. `BOOKSTORE_USE_IN_MEMORY_DB=true cargo run -p bookstore_books --features server`)
//! and run `cargo test -p bookstore_tests --features system_tests`.

use bookstore_books::api::Book;
use rand::{thread_rng, Rng};



/// Url of the service under test, `BOOKSTORE_URL` or the default local address
pub fn service_url() -> String {
    std::env::var("BOOKSTORE_URL").unwrap_or("http://127.0.0.1:8080".to_string())
}

/// Isbn which is not used by any previous test run
pub fn unique_isbn(prefix: &str) -> String {
    format!("{}{}", prefix, thread_rng().gen::<u64>())
}

pub fn sample_book(isbn: &str) -> Book {
    Book {
        isbn: isbn.to_string(),
        amazon_url: "https://www.example.com".to_string(),
        author: "Jane Smith".to_string(),
        language: "English".to_string(),
        pages: 250,
        publisher: "Sample Publishing".to_string(),
        title: "New Book".to_string(),
        year: 2023,
    }
}
