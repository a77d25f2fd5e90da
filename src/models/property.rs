//! The Property record

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Price;

/// A stored property listing.
///
/// `id` and `created_at` are assigned by the store and never change. The
/// serialized form is exactly `{id, title, description, price, location,
/// created_at}` and doubles as the QueryCache payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.location)
    }
}
