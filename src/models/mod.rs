//! Domain records and HTTP DTOs

pub mod price;
pub mod property;
pub mod requests;
pub mod responses;

pub use price::{Price, PriceError};
pub use property::Property;
pub use requests::PropertyInput;
pub use responses::{HealthResponse, PropertyListResponse};
