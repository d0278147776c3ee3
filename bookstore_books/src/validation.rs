use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::web::Bytes;
use actix_web::Error;
use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::schema::{FieldRule, FieldType, BOOK_SCHEMA};

fn has_type(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Integer => {
            value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|number| number.fract() == 0.0)
        }
    }
}

/// Whole numbers written as floats (`250.0`) within the `i64` range
fn integral_float(value: &Value) -> Option<i64> {
    if value.is_i64() || value.is_u64() {
        return None;
    }
    value
        .as_f64()
        .filter(|number| {
            number.fract() == 0.0 && *number >= i64::MIN as f64 && *number < i64::MAX as f64
        })
        .map(|number| number as i64)
}

fn type_name(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "string",
        FieldType::Integer => "integer",
    }
}

/// Parses a raw request body. Bodies which are empty, `null` or not JSON at all
/// are treated as an empty object so that they fail on the missing fields.
pub fn parse_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice(bytes) {
        Ok(Value::Null) | Err(_) => Value::Object(Map::new()),
        Ok(value) => value,
    }
}

/// Checks `body` against `schema` and returns every violation found, in schema order.
/// An empty result means the body is valid.
pub fn validate(body: &Value, schema: &[FieldRule]) -> Vec<String> {
    let Some(fields) = body.as_object() else {
        return vec!["instance is not of a type(s) object".to_string()];
    };

    schema
        .iter()
        .filter_map(|rule| match fields.get(rule.name) {
            None if rule.required => Some(format!("instance requires property \"{}\"", rule.name)),
            None => None,
            Some(value) if !has_type(rule.field_type, value) => Some(format!(
                "instance.{} is not of a type(s) {}",
                rule.name,
                type_name(rule.field_type)
            )),
            Some(_) => None,
        })
        .collect()
}

/// Rewrites integer fields given as whole floats into plain integers, so that a body
/// which passed [`validate`] also deserializes into typed records.
/// Returns true when the body was changed.
pub fn normalize_integers(body: &mut Value, schema: &[FieldRule]) -> bool {
    let Some(fields) = body.as_object_mut() else {
        return false;
    };

    let mut changed = false;
    for rule in schema
        .iter()
        .filter(|rule| rule.field_type == FieldType::Integer)
    {
        if let Some(value) = fields.get_mut(rule.name) {
            if let Some(integer) = integral_float(value) {
                *value = Value::from(integer);
                changed = true;
            }
        }
    }
    changed
}

/// Middleware validating bodies of book writes (POST and PUT) against [`BOOK_SCHEMA`].
///
/// On success the buffered body is put back on the request and the next service is called.
/// Otherwise the request is answered with 400 and the list of violations, and the
/// handler never runs. Requests with other methods pass through untouched.
pub async fn validate_book_body<B: MessageBody + 'static>(
    mut req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse, Error> {
    if !matches!(*req.method(), Method::POST | Method::PUT) {
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    }

    let bytes = match req.extract::<Bytes>().await {
        Ok(bytes) => bytes,
        Err(err) => return Ok(req.error_response(err)),
    };

    let mut body = parse_body(&bytes);
    let violations = validate(&body, BOOK_SCHEMA);
    if !violations.is_empty() {
        return Ok(req.error_response(ServiceError::validation(violations)));
    }

    let bytes = if normalize_integers(&mut body, BOOK_SCHEMA) {
        Bytes::from(
            serde_json::to_vec(&body).map_err(|err| ServiceError::Unexpected(err.into()))?,
        )
    } else {
        bytes
    };

    req.set_payload(Payload::from(bytes));
    next.call(req).await.map(ServiceResponse::map_into_boxed_body)
}

#[cfg(test)]
mod validation_tests {
    use serde_json::json;

    use crate::schema::{FieldRule, FieldType, BOOK_SCHEMA};
    use crate::validation::{normalize_integers, parse_body, validate};

    fn valid_book() -> serde_json::Value {
        json!({
            "isbn": "0691161518",
            "amazon_url": "http://a.co/eobPtX2",
            "author": "Matthew Lane",
            "language": "english",
            "pages": 264,
            "publisher": "Princeton University Press",
            "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
            "year": 2017
        })
    }

    #[test]
    fn test_valid_book_has_no_violations() {
        assert_eq!(validate(&valid_book(), BOOK_SCHEMA), Vec::<String>::new());
    }

    #[test]
    fn test_values_are_not_checked_beyond_their_type() {
        let body = json!({
            "isbn": "",
            "amazon_url": "not a url",
            "author": "",
            "language": "",
            "pages": -5,
            "publisher": "",
            "title": "",
            "year": 0
        });
        assert!(validate(&body, BOOK_SCHEMA).is_empty());
    }

    #[test]
    fn test_every_missing_field_is_reported_in_schema_order() {
        let mut body = valid_book();
        let fields = body.as_object_mut().unwrap();
        fields.remove("title");
        fields.remove("amazon_url");
        fields.remove("year");

        assert_eq!(
            validate(&body, BOOK_SCHEMA),
            vec![
                "instance requires property \"amazon_url\"",
                "instance requires property \"title\"",
                "instance requires property \"year\"",
            ]
        );
    }

    #[test]
    fn test_wrong_types_are_reported_next_to_missing_fields() {
        let body = json!({"isbn": "111", "pages": "not-a-number"});

        let violations = validate(&body, BOOK_SCHEMA);
        assert_eq!(
            violations,
            vec![
                "instance requires property \"amazon_url\"",
                "instance requires property \"author\"",
                "instance requires property \"language\"",
                "instance.pages is not of a type(s) integer",
                "instance requires property \"publisher\"",
                "instance requires property \"title\"",
                "instance requires property \"year\"",
            ]
        );
    }

    #[test]
    fn test_integer_fields_reject_floats_and_nulls() {
        let mut body = valid_book();
        body["pages"] = json!(12.5);
        body["year"] = json!(null);
        body["author"] = json!(42);

        assert_eq!(
            validate(&body, BOOK_SCHEMA),
            vec![
                "instance.author is not of a type(s) string",
                "instance.pages is not of a type(s) integer",
                "instance.year is not of a type(s) integer",
            ]
        );
    }

    #[test]
    fn test_whole_floats_are_integers() {
        let mut body = valid_book();
        body["pages"] = json!(250.0);
        body["year"] = json!(2023.0);
        assert!(validate(&body, BOOK_SCHEMA).is_empty());

        assert!(normalize_integers(&mut body, BOOK_SCHEMA));
        assert_eq!(body["pages"], json!(250));
        assert_eq!(body["year"], json!(2023));
        assert!(body["pages"].is_i64());
    }

    #[test]
    fn test_normalize_leaves_plain_integers_and_strings_alone() {
        let mut body = valid_book();
        body["title"] = json!("250.0");
        let expected = body.clone();

        assert!(!normalize_integers(&mut body, BOOK_SCHEMA));
        assert_eq!(body, expected);
    }

    #[test]
    fn test_empty_and_malformed_bodies_miss_every_field() {
        let bodies: [&[u8]; 4] = [b"", b"   ", b"null", b"{\"isbn\": "];
        for raw in bodies {
            let violations = validate(&parse_body(raw), BOOK_SCHEMA);
            assert_eq!(violations.len(), BOOK_SCHEMA.len());
            assert!(violations
                .iter()
                .all(|violation| violation.starts_with("instance requires property")));
        }
    }

    #[test]
    fn test_non_object_body_is_rejected_once() {
        assert_eq!(
            validate(&json!([valid_book()]), BOOK_SCHEMA),
            vec!["instance is not of a type(s) object"]
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let body = json!({"pages": "many"});
        assert_eq!(validate(&body, BOOK_SCHEMA), validate(&body, BOOK_SCHEMA));
    }

    #[test]
    fn test_optional_fields_may_be_missing_but_not_mistyped() {
        let schema = [FieldRule {
            name: "subtitle",
            required: false,
            field_type: FieldType::String,
        }];
        assert!(validate(&json!({}), &schema).is_empty());
        assert_eq!(
            validate(&json!({"subtitle": 1}), &schema),
            vec!["instance.subtitle is not of a type(s) string"]
        );
    }
}
