//! Configuration loading and validation for the automation engine.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
