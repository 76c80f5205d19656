//! Compute module - Instruction decoding, maze simulation and evolution.

mod instruction;
mod simulator;

pub mod evolution;

pub use instruction::*;
pub use simulator::*;
