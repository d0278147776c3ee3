use actix_web::middleware::from_fn;
use actix_web::web::JsonConfig;
use paperclip::actix::web;

use crate::error::ServiceError;
use crate::handlers;
use crate::validation::validate_book_body;

/// JSON extraction settings for book bodies. Bodies reaching the handlers were already
/// checked by [`validate_book_body`], anything still failing to deserialize is a client error.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            ServiceError::validation(vec![err.to_string()]).into()
        })
}

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/books")
                .service(
                    web::resource("")
                        .route(web::get().to(handlers::list_books))
                        .route(web::post().to(handlers::create_book))
                        .wrap(from_fn(validate_book_body)),
                )
                .service(
                    web::resource("/{isbn}")
                        .route(web::get().to(handlers::get_book))
                        .route(web::put().to(handlers::update_book))
                        .route(web::delete().to(handlers::delete_book))
                        .wrap(from_fn(validate_book_body)),
                ),
        );
}
