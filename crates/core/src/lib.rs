//! Core decision logic. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod error;
pub mod formation;
pub mod geom;
pub mod members;
pub mod rng;
pub mod state;
pub mod strategy;
pub mod treasure;
pub mod visitor;
pub mod watchdog;

pub use config::*;
pub use error::*;
pub use formation::*;
pub use geom::*;
pub use members::*;
pub use rng::*;
pub use state::*;
pub use strategy::*;
pub use treasure::*;
pub use visitor::*;
pub use watchdog::*;
