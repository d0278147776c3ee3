use std::fmt;

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

pub type Isbn = String;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
/// Single book record, identified by its isbn
pub struct Book {
    pub isbn: Isbn,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
/// Error detail rendered to the client: the list of validation failures,
/// or a single message for every other failure
pub enum ErrorPayload {
    Violations(Vec<String>),
    Message(String),
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Violations(violations) => write!(f, "{}", violations.join("; ")),
            ErrorPayload::Message(message) => write!(f, "{}", message),
        }
    }
}

impl From<Vec<String>> for ErrorPayload {
    fn from(violations: Vec<String>) -> Self {
        ErrorPayload::Violations(violations)
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ErrorBody {
    pub message: ErrorPayload,
    pub status: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Envelope of every error response: `{"error": {"message": .., "status": ..}}`
pub struct ErrorResponse {
    pub error: ErrorBody,
}
