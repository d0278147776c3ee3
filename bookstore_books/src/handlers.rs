use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{Book, BookResponse, BooksResponse, Isbn, MessageResponse};
use crate::books_repository::BooksRepository;
use crate::error::ServiceError;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn list_books(
    books_repository: Data<Arc<dyn BooksRepository>>,
) -> Result<HttpResponse, Error> {
    let books = books_repository
        .list_books()
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(BooksResponse { books }))
}

#[api_v2_operation]
pub async fn create_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    book: web::Json<Book>,
) -> Result<HttpResponse, Error> {
    let book = books_repository
        .create_book(book.into_inner())
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Created()
        .append_header((LOCATION, format!("/books/{}", book.isbn)))
        .json(BookResponse { book }))
}

#[api_v2_operation]
pub async fn get_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    isbn: web::Path<Isbn>,
) -> Result<HttpResponse, Error> {
    let book = books_repository
        .get_book(&isbn)
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(BookResponse { book }))
}

#[api_v2_operation]
pub async fn update_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    isbn: web::Path<Isbn>,
    book: web::Json<Book>,
) -> Result<HttpResponse, Error> {
    let book = books_repository
        .update_book(&isbn, book.into_inner())
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(BookResponse { book }))
}

#[api_v2_operation]
pub async fn delete_book(
    books_repository: Data<Arc<dyn BooksRepository>>,
    isbn: web::Path<Isbn>,
) -> Result<HttpResponse, Error> {
    books_repository
        .delete_book(&isbn)
        .await
        .map_err(ServiceError::from)?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
