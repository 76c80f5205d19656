//! Schema module - Configuration, maze and reporting types.

mod config;
mod evolution;
mod maze;

pub use config::*;
pub use evolution::*;
pub use maze::*;
