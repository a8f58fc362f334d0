pub mod error;
pub mod models;
pub mod validation;
pub mod tally;

pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
pub use tally::tally;

#[cfg(test)]
mod tests;
