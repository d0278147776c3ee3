/// Primitive JSON type a field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

/// Shape constraint of a single field in a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub field_type: FieldType,
}

const fn required(name: &'static str, field_type: FieldType) -> FieldRule {
    FieldRule {
        name,
        required: true,
        field_type,
    }
}

/// Required shape of a book record. Rules are evaluated in this order.
pub const BOOK_SCHEMA: &[FieldRule] = &[
    required("isbn", FieldType::String),
    required("amazon_url", FieldType::String),
    required("author", FieldType::String),
    required("language", FieldType::String),
    required("pages", FieldType::Integer),
    required("publisher", FieldType::String),
    required("title", FieldType::String),
    required("year", FieldType::Integer),
];

#[cfg(test)]
mod schema_tests {
    use super::{FieldType, BOOK_SCHEMA};

    #[test]
    fn test_every_book_field_is_required() {
        let names: Vec<_> = BOOK_SCHEMA.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            vec!["isbn", "amazon_url", "author", "language", "pages", "publisher", "title", "year"]
        );
        assert!(BOOK_SCHEMA.iter().all(|rule| rule.required));
    }

    #[test]
    fn test_only_pages_and_year_are_integers() {
        let integers: Vec<_> = BOOK_SCHEMA
            .iter()
            .filter(|rule| rule.field_type == FieldType::Integer)
            .map(|rule| rule.name)
            .collect();
        assert_eq!(integers, vec!["pages", "year"]);
    }
}
