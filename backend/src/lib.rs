pub mod auth;
pub mod processor;
pub mod queries;
pub mod routes;
pub mod store;
pub mod cors;
pub mod error;
pub mod utils;
pub mod catchers;
pub use shared::{models::*, error::*, validation::ValidationError};
