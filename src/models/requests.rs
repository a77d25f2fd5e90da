//! Request DTOs
//!
//! The writable shape of a Property.

use serde::Deserialize;

use super::Price;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum location length in characters
pub const MAX_LOCATION_LENGTH: usize = 100;

/// Input for creating or replacing a property.
///
/// `id` and `created_at` are output-only; if a payload carries them they are
/// ignored like any other unknown field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyInput {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl PropertyInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            location: location.into(),
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("title may not be blank".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Some(format!(
                "title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            ));
        }
        if self.description.trim().is_empty() {
            return Some("description may not be blank".to_string());
        }
        if self.location.trim().is_empty() {
            return Some("location may not be blank".to_string());
        }
        if self.location.chars().count() > MAX_LOCATION_LENGTH {
            return Some(format!(
                "location exceeds maximum length of {} characters",
                MAX_LOCATION_LENGTH
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PropertyInput {
        PropertyInput::new("Loft", "Open plan", "1200.00".parse().unwrap(), "NYC")
    }

    #[test]
    fn test_deserialize_ignores_read_only_fields() {
        let json = r#"{
            "id": 99,
            "created_at": "2001-01-01T00:00:00Z",
            "title": "Loft",
            "description": "Open plan",
            "price": 1200.00,
            "location": "NYC"
        }"#;
        let input: PropertyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, valid());
    }

    #[test]
    fn test_deserialize_rejects_bad_price() {
        let json = r#"{"title":"t","description":"d","price":"1.001","location":"l"}"#;
        assert!(serde_json::from_str::<PropertyInput>(json).is_err());
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(valid().validate().is_none());
    }

    #[test]
    fn test_validate_blank_fields() {
        let mut input = valid();
        input.title = "   ".to_string();
        assert!(input.validate().is_some());

        let mut input = valid();
        input.description = String::new();
        assert!(input.validate().is_some());

        let mut input = valid();
        input.location = String::new();
        assert!(input.validate().is_some());
    }

    #[test]
    fn test_validate_lengths() {
        let mut input = valid();
        input.title = "x".repeat(MAX_TITLE_LENGTH);
        assert!(input.validate().is_none());
        input.title.push('x');
        assert!(input.validate().is_some());

        let mut input = valid();
        input.location = "y".repeat(MAX_LOCATION_LENGTH + 1);
        assert!(input.validate().is_some());
    }
}
